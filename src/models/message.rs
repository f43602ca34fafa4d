/// Tipo de mensaje mostrado al operador
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Clase CSS asociada
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "message-success",
            MessageKind::Error => "message-error",
        }
    }
}

/// Mensaje de resultado (verificación o envío de pase)
#[derive(Clone, Debug, PartialEq)]
pub struct FlashMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == MessageKind::Success
    }
}
