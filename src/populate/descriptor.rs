/// Per-field cookie binding parsed from a tag such as `"Access-Token,signed"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDescriptor {
    pub name: String,
    pub signed: bool,
    pub explicitly_unsigned: bool,
    pub omit_empty: bool,
}

impl CookieDescriptor {
    /// Parse `name[,modifier[,modifier...]]`.
    ///
    /// Returns `None` when the name is empty: such a field is never
    /// populated. Unknown modifiers are ignored.
    pub fn parse(tag: &str) -> Option<Self> {
        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let mut descriptor = Self {
            name: name.to_string(),
            signed: false,
            explicitly_unsigned: false,
            omit_empty: false,
        };
        for modifier in parts {
            match modifier {
                "signed" => descriptor.signed = true,
                "unsigned" => descriptor.explicitly_unsigned = true,
                "omitempty" => descriptor.omit_empty = true,
                _ => {}
            }
        }
        Some(descriptor)
    }

    /// Whether the value must pass signature verification.
    ///
    /// `unsigned` overrides `signed` when both are present.
    pub fn verify_signature(&self) -> bool {
        self.signed && !self.explicitly_unsigned
    }
}
