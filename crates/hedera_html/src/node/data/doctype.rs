/// Data structure for doctype nodes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocTypeData {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl DocTypeData {
    pub(crate) fn new(name: &str, public_id: &str, system_id: &str) -> Self {
        Self {
            name: name.to_owned(),
            public_id: public_id.to_owned(),
            system_id: system_id.to_owned(),
        }
    }

    /// The doctype inserted into documents that do not declare one
    pub(crate) fn html4_transitional() -> Self {
        Self::new(
            "html",
            "-//W3C//DTD HTML 4.0 Transitional//EN",
            "http://www.w3.org/TR/REC-html40/loose.dtd",
        )
    }
}
