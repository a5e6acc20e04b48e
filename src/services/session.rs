/// Identity of the caller, as established by the upstream auth service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Blank ids count as anonymous.
    pub fn from_header_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Self::authenticated(id),
            _ => Self::anonymous(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value_parsing() {
        assert_eq!(Session::from_header_value(Some("u1")).user_id(), Some("u1"));
        assert_eq!(Session::from_header_value(Some("  u1 ")).user_id(), Some("u1"));
        assert_eq!(Session::from_header_value(Some("   ")).user_id(), None);
        assert_eq!(Session::from_header_value(None).user_id(), None);
    }
}
