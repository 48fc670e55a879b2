//! Enumerated setting values.
//!
//! Each type round-trips through the exact lowercase token the user types on
//! the command line and the token stored in `settings.json`.

use serde::{Deserialize, Serialize};

macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $token)] $variant),+
        }

        impl $name {
            /// Every accepted token, in declaration order.
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }

            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $($token => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s).ok_or_else(|| {
                    format!("'{s}' is not a valid choice. Valid values: {}", Self::TOKENS.join(", "))
                })
            }
        }
    };
}

setting_enum! {
    /// Deterministic sampling override.
    pub enum SamplingMode {
        Greedy => "greedy",
    }
}

setting_enum! {
    /// Safety guardrail level requested from the model runtime.
    pub enum Guardrails {
        Default => "default",
        /// Relaxed guardrails for content transformation tasks.
        Permissive => "permissive",
    }
}

setting_enum! {
    /// Built-in tools the model may call.
    pub enum ToolKind {
        Shell => "shell",
        FileRead => "file-read",
    }
}

setting_enum! {
    /// How tool invocations are approved.
    pub enum ToolApproval {
        Ask => "ask",
        Auto => "auto",
    }
}

setting_enum! {
    /// Output rendering for responses.
    pub enum OutputFormat {
        Text => "text",
        Json => "json",
    }
}

setting_enum! {
    /// Response language hint.
    pub enum Language {
        Ja => "ja",
        En => "en",
    }
}

impl Language {
    /// Canned instruction asking the model to answer in this language.
    pub fn hint(self) -> &'static str {
        match self {
            Language::Ja => "Respond in Japanese.",
            Language::En => "Respond in English.",
        }
    }
}
