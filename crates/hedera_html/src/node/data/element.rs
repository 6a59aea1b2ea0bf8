use crate::node::HTML_NAMESPACE;

/// A single attribute of an element. Attributes keep their source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Data structure for element nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementData {
    /// Local name of the element
    pub name: String,
    /// Namespace url of the element
    pub namespace: String,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
}

impl ElementData {
    pub(crate) fn new(name: &str, namespace: Option<&str>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.to_owned(),
            namespace: namespace.unwrap_or(HTML_NAMESPACE).to_owned(),
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns true when this element has the given (html) tag name. Comparison is ascii case
    /// insensitive.
    pub fn is_named(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// Returns the value of the attribute with the given name. Attribute names are matched ascii
    /// case insensitive.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Sets the attribute to the given value, replacing any existing value
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = value.to_owned(),
            None => self.attributes.push(Attribute {
                name: name.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    /// Adds the attribute only when no attribute with that name exists
    pub(crate) fn add_attribute_if_missing(&mut self, name: &str, value: &str) {
        if self.attribute(name).is_none() {
            self.set_attribute(name, value);
        }
    }

    /// Removes the attribute. Returns true when it existed.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let len = self.attributes.len();
        self.attributes
            .retain(|attr| !attr.name.eq_ignore_ascii_case(name));

        self.attributes.len() != len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    #[test]
    fn defaults_to_html_namespace() {
        let data = ElementData::new("div", None, vec![]);
        assert_eq!(data.name(), "div");
        assert_eq!(data.namespace(), HTML_NAMESPACE);
        assert!(data.is_named("DIV"));
        assert!(!data.is_named("span"));
    }

    #[test]
    fn attributes_keep_order() {
        let mut data = ElementData::new("meta", None, vec![attr("http-equiv", "Content-Type")]);
        data.set_attribute("content", "text/html");
        data.set_attribute("HTTP-EQUIV", "refresh");

        let names: Vec<&str> = data.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["http-equiv", "content"]);
        assert_eq!(data.attribute("http-equiv"), Some("refresh"));
    }

    #[test]
    fn add_if_missing() {
        let mut data = ElementData::new("body", None, vec![attr("class", "a")]);
        data.add_attribute_if_missing("class", "b");
        data.add_attribute_if_missing("id", "main");

        assert_eq!(data.attribute("class"), Some("a"));
        assert_eq!(data.attribute("id"), Some("main"));
    }

    #[test]
    fn remove() {
        let mut data = ElementData::new("p", None, vec![attr("id", "x")]);
        assert!(data.remove_attribute("ID"));
        assert!(!data.remove_attribute("id"));
        assert!(data.attributes().is_empty());
    }
}
