use marl_runtime::error::WantedArity;

/// Form evaluated by the evaluator instead of being applied as a function
///
/// Special forms are recognised by the symbol at the head of a list before any environment lookup.
/// This means they can't be shadowed by a binding of the same name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpecialForm {
    Def,
    Let,
    Do,
    If,
    Fn,
}

pub const SPECIAL_FORMS: &[SpecialForm] = &[
    SpecialForm::Def,
    SpecialForm::Let,
    SpecialForm::Do,
    SpecialForm::If,
    SpecialForm::Fn,
];

impl SpecialForm {
    pub fn from_name(name: &str) -> Option<SpecialForm> {
        SPECIAL_FORMS
            .iter()
            .copied()
            .find(|special_form| special_form.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Def => "def!",
            SpecialForm::Let => "let*",
            SpecialForm::Do => "do",
            SpecialForm::If => "if",
            SpecialForm::Fn => "fn*",
        }
    }

    /// Number of operands following the head symbol
    pub fn wanted_arity(self) -> WantedArity {
        match self {
            SpecialForm::Def | SpecialForm::Let | SpecialForm::Fn => WantedArity::Exact(2),
            SpecialForm::Do => WantedArity::AtLeast(1),
            SpecialForm::If => WantedArity::Between(2, 3),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn name_lookup() {
        for special_form in SPECIAL_FORMS {
            assert_eq!(
                Some(*special_form),
                SpecialForm::from_name(special_form.name())
            );
        }

        assert_eq!(None, SpecialForm::from_name("def"));
        assert_eq!(None, SpecialForm::from_name("let"));
        assert_eq!(None, SpecialForm::from_name("fn"));
    }

    #[test]
    fn arity() {
        assert!(!SpecialForm::Do.wanted_arity().accepts(0));
        assert!(SpecialForm::If.wanted_arity().accepts(2));
        assert!(SpecialForm::If.wanted_arity().accepts(3));
        assert!(!SpecialForm::If.wanted_arity().accepts(4));
    }
}
