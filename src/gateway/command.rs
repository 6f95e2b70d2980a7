use serde::Deserialize;

/// A command body as decoded from JSON, before field validation.
///
/// Every field is optional at this stage; unknown members are ignored.
/// Absent, null, and empty-string fields are all treated as unset.
#[derive(Debug, Deserialize)]
pub struct RawCommand {
    pub action: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}

/// A validated store command, immutable once constructed.
///
/// The variant carries exactly the data its operation needs, so a write
/// value can never leak into a read and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get { key: String },
    Set { key: String, value: String },
}

impl RawCommand {
    /// Validates field presence and shape, yielding a [`Command`].
    ///
    /// Rules are checked in a fixed order and validation stops at the first
    /// failure; the returned message is client-facing text and part of the
    /// gateway's contract:
    ///
    /// 1. `action` must be set and non-empty
    /// 2. `key` must be set and non-empty
    /// 3. `action` must be "get" or "set"
    /// 4. for "set", `value` must be set and non-empty
    ///
    /// A `value` on a "get" command is ignored.
    pub fn validate(self) -> Result<Command, String> {
        let action = self.action.filter(|s| !s.is_empty());
        let key = self.key.filter(|s| !s.is_empty());
        let value = self.value.filter(|s| !s.is_empty());

        let Some(action) = action else {
            return Err("`action` is not set.\n".to_string());
        };

        let Some(key) = key else {
            return Err("`key` is not set.\n".to_string());
        };

        match action.as_str() {
            "get" => Ok(Command::Get { key }),

            "set" => match value {
                Some(value) => Ok(Command::Set { key, value }),
                None => Err(
                    "`value` is not set. `value` must be set and must be not empty while using `\"action\": \"set\"`.\n"
                        .to_string(),
                ),
            },

            _ => Err(
                "`action` has unknown variant. `action` can be \"get\" or \"set\".\n".to_string(),
            ),
        }
    }
}
