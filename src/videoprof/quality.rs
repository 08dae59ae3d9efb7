use crate::preference::Preference;
use std::rc::Rc;

/// A preference resolved for one file, together with the title of the
/// attribute that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quality {
    pub attribute: String,
    pub preference: Rc<Preference>,
}

impl Quality {
    pub fn new(attribute: impl Into<String>, preference: Rc<Preference>) -> Self {
        Self {
            attribute: attribute.into(),
            preference,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.preference.is_flagged()
    }
}
