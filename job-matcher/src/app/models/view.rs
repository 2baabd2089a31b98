//! Application view routing

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Upload form, run controls and the pipeline graph
    #[default]
    Dashboard,
    /// Ranked matches
    Results,
}

/// Focusable rows of the dashboard form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Email,
    Mode,
    Resume,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Email, FormField::Mode, FormField::Resume];

    pub fn next(self) -> Self {
        match self {
            FormField::Email => FormField::Mode,
            FormField::Mode => FormField::Resume,
            FormField::Resume => FormField::Email,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Email => FormField::Resume,
            FormField::Mode => FormField::Email,
            FormField::Resume => FormField::Mode,
        }
    }

    /// Whether the row holds free text
    pub fn is_text(self) -> bool {
        !matches!(self, FormField::Mode)
    }
}
