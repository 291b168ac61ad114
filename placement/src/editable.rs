use crate::define_flags;
use crate::flags::FlagSet;

define_flags!(EditableTransform, u8, {
    Translate,
    Rotate,
    Scale,
});

/// Which user manipulations the placed model accepts. Everything is editable by default.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EditableTransforms(FlagSet<EditableTransform>);

impl Default for EditableTransforms {
    fn default() -> Self {
        Self(FlagSet::from_flags(EditableTransform::ALL))
    }
}

impl EditableTransforms {
    pub fn none() -> Self {
        Self(FlagSet::empty())
    }

    pub fn allows(&self, kind: EditableTransform) -> bool {
        self.0.contains(kind)
    }

    pub fn set(&mut self, kind: EditableTransform, enabled: bool) {
        self.0.set(kind, enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_one_kind_leaves_others() {
        let mut e = EditableTransforms::default();
        e.set(EditableTransform::Scale, false);
        assert!(!e.allows(EditableTransform::Scale));
        assert!(e.allows(EditableTransform::Translate));
        assert!(e.allows(EditableTransform::Rotate));

        let none = EditableTransforms::none();
        assert!(!none.allows(EditableTransform::Translate));
    }
}
