//! In-memory page model.
//!
//! A [`Page`] is an ordered set of elements addressed by string id, grouped
//! into titled panels. Controllers read and write it; the terminal host
//! draws it and feeds user input back into it.

pub mod bindings;
pub mod templates;

use std::collections::HashMap;

/// Handle to an element of one particular [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Input,
    Password,
    Select,
    Container,
}

impl Kind {
    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Input | Self::Password | Self::Select)
    }
}

/// Rendered content inside an element: a transaction row, an account card,
/// a select option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    pub class: String,
    pub text: String,
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn option(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class: "option".into(),
            text: text.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    /// First descendant (depth first, self included) carrying `class`.
    pub fn find(&self, class: &str) -> Option<&Node> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(class))
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub kind: Kind,
    pub label: String,
    pub text: String,
    pub value: String,
    pub class: String,
    pub visible: bool,
    pub required: bool,
    /// Form submitted when the user presses Enter on this element
    pub form: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(id: &str, kind: Kind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: String::new(),
            text: String::new(),
            value: String::new(),
            class: String::new(),
            visible: true,
            required: false,
            form: None,
            children: Vec::new(),
        }
    }

    pub fn text(id: &str) -> Self {
        Self::new(id, Kind::Text)
    }

    pub fn input(id: &str, label: &str) -> Self {
        Self::new(id, Kind::Input).with_label(label)
    }

    pub fn password(id: &str, label: &str) -> Self {
        Self::new(id, Kind::Password).with_label(label)
    }

    /// A select whose value starts at its first option.
    pub fn select(id: &str, label: &str, options: Vec<Node>) -> Self {
        let mut e = Self::new(id, Kind::Select).with_label(label);
        e.value = options
            .first()
            .and_then(|o| o.value.clone())
            .unwrap_or_default();
        e.children = options;
        e
    }

    pub fn container(id: &str) -> Self {
        Self::new(id, Kind::Container)
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }

    pub fn in_form(mut self, form: &str) -> Self {
        self.form = Some(form.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    /// Text of the option matching the current value.
    pub fn selected_text(&self) -> Option<&str> {
        self.children
            .iter()
            .find(|o| o.value.as_deref() == Some(self.value.as_str()))
            .map(|o| o.text.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
    Footer,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub column: Column,
    pub elements: Vec<ElementId>,
    /// When set, the panel is only drawn while this element is visible.
    pub shown_by: Option<ElementId>,
}

#[derive(Debug, Clone)]
pub struct Page {
    name: String,
    elements: Vec<Element>,
    index: HashMap<String, ElementId>,
    panels: Vec<Panel>,
    location: Option<String>,
}

impl Page {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            elements: Vec::new(),
            index: HashMap::new(),
            panels: Vec::new(),
            location: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a panel; its elements are appended to the page in order.
    pub fn add_panel(&mut self, title: &str, column: Column, elements: Vec<Element>) -> usize {
        let ids = elements.into_iter().map(|e| self.insert(e)).collect();
        self.panels.push(Panel {
            title: title.to_string(),
            column,
            elements: ids,
            shown_by: None,
        });
        self.panels.len() - 1
    }

    /// Tie a panel's visibility to one of its elements.
    pub fn show_panel_with(&mut self, panel: usize, element: ElementId) {
        if let Some(p) = self.panels.get_mut(panel) {
            p.shown_by = Some(element);
        }
    }

    fn insert(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        self.index.insert(element.id.clone(), id);
        self.elements.push(element);
        id
    }

    pub fn find(&self, id: &str) -> Option<ElementId> {
        self.index.get(id).copied()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.get(id).text
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.get_mut(id).text = text.into();
    }

    pub fn value(&self, id: ElementId) -> &str {
        &self.get(id).value
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.get_mut(id).value = value.into();
    }

    pub fn clear_value(&mut self, id: ElementId) {
        self.get_mut(id).value.clear();
    }

    pub fn set_class(&mut self, id: ElementId, class: impl Into<String>) {
        self.get_mut(id).class = class.into();
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.get(id).visible
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.get_mut(id).visible = visible;
    }

    pub fn is_required(&self, id: ElementId) -> bool {
        self.get(id).required
    }

    pub fn set_required(&mut self, id: ElementId, required: bool) {
        self.get_mut(id).required = required;
    }

    pub fn children(&self, id: ElementId) -> &[Node] {
        &self.get(id).children
    }

    pub fn replace_children(&mut self, id: ElementId, children: Vec<Node>) {
        self.get_mut(id).children = children;
    }

    /// Move a select to the option `delta` steps away, wrapping around.
    pub fn cycle_option(&mut self, id: ElementId, delta: isize) {
        let e = self.get_mut(id);
        let values: Vec<String> = e.children.iter().filter_map(|o| o.value.clone()).collect();
        if values.is_empty() {
            return;
        }
        let cur = values.iter().position(|v| *v == e.value).unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(values.len() as isize) as usize;
        e.value = values[next].clone();
    }

    pub fn navigate(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Focusable elements in panel order, skipping hidden ones.
    pub fn focusables(&self) -> Vec<ElementId> {
        self.panels
            .iter()
            .flat_map(|p| p.elements.iter().copied())
            .filter(|&id| {
                let e = self.get(id);
                e.visible && e.kind.is_focusable()
            })
            .collect()
    }
}

impl AsRef<Page> for Page {
    fn as_ref(&self) -> &Page {
        self
    }
}

impl AsMut<Page> for Page {
    fn as_mut(&mut self) -> &mut Page {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Page {
        let mut page = Page::new("sample");
        page.add_panel(
            "Form",
            Column::Right,
            vec![
                Element::input("amount", "Amount").in_form("f"),
                Element::select(
                    "kind",
                    "Kind",
                    vec![Node::option("a", "A"), Node::option("b", "B"), Node::option("c", "C")],
                ),
                Element::input("hiddenInput", "Hidden").hidden(),
                Element::text("note"),
            ],
        );
        page
    }

    #[test]
    fn lookup_by_id() {
        let page = sample();
        let amount = page.find("amount").unwrap();
        assert_eq!(page.get(amount).label, "Amount");
        assert_eq!(page.get(amount).form.as_deref(), Some("f"));
        assert!(page.find("missing").is_none());
    }

    #[test]
    fn select_starts_at_first_option_and_wraps() {
        let mut page = sample();
        let kind = page.find("kind").unwrap();
        assert_eq!(page.value(kind), "a");
        page.cycle_option(kind, -1);
        assert_eq!(page.value(kind), "c");
        page.cycle_option(kind, 2);
        assert_eq!(page.value(kind), "b");
        assert_eq!(page.get(kind).selected_text(), Some("B"));
    }

    #[test]
    fn focusables_skip_hidden_and_static_elements() {
        let mut page = sample();
        let ids: Vec<_> = page.focusables().iter().map(|&id| page.get(id).id.clone()).collect();
        assert_eq!(ids, vec!["amount", "kind"]);

        let hidden = page.find("hiddenInput").unwrap();
        page.set_visible(hidden, true);
        assert_eq!(page.focusables().len(), 3);
    }

    #[test]
    fn node_find_searches_descendants() {
        let row = Node::new("transaction-item")
            .with_child(Node::new("transaction-info").with_child(Node::new("transaction-type").with_text("DEPOSIT")))
            .with_child(Node::new("transaction-amount positive").with_text("+$1.00"));
        assert_eq!(row.find("transaction-type").unwrap().text, "DEPOSIT");
        assert!(row.find("positive").unwrap().has_class("transaction-amount"));
        assert!(row.find("negative").is_none());
    }
}
