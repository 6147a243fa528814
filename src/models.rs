use crate::config::TimeZoneMode;
use crate::errors::InputError;
use crate::time::parse_datetime_local;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// The token, if the server sent a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Filter dimension sent alongside the time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    UserId,
    Phone,
    Voicemail,
    Cluster,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::UserId,
        Parameter::Phone,
        Parameter::Voicemail,
        Parameter::Cluster,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Parameter::UserId => "user_id",
            Parameter::Phone => "phone",
            Parameter::Voicemail => "voicemail",
            Parameter::Cluster => "cluster",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::UserId => "User ID",
            Parameter::Phone => "Phone Number",
            Parameter::Voicemail => "Voicemail",
            Parameter::Cluster => "Cluster",
        }
    }

    /// Maps a select value to a filter; the empty string means "no filter".
    pub fn from_form(value: &str) -> Result<Option<Self>, InputError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Self::ALL
            .into_iter()
            .find(|parameter| parameter.as_str() == value)
            .map(Some)
            .ok_or_else(|| InputError::Parameter(value.to_string()))
    }
}

/// Raw values of the data form, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataForm {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub parameter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Query {
    pub start_time: i64,
    pub end_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Parameter>,
}

impl Query {
    pub fn from_form(form: &DataForm, zone: TimeZoneMode) -> Result<Self, InputError> {
        Ok(Self {
            start_time: parse_datetime_local(&form.start_time, zone)?,
            end_time: parse_datetime_local(&form.end_time, zone)?,
            parameter: Parameter::from_form(&form.parameter)?,
        })
    }
}

/// Record ids arrive as strings from some deployments and numbers from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub user_id: String,
    pub origination_time: i64,
    pub cluster_id: String,
    #[serde(default)]
    pub phones: Vec<Identifier>,
    #[serde(default)]
    pub voicemails: Vec<Identifier>,
}

/// Display and export projection of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub user_id: String,
    pub origination_time: String,
    pub cluster_id: String,
    pub phones: String,
    pub voicemails: String,
}

impl Row {
    pub fn fields(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.user_id.as_str(),
            self.origination_time.as_str(),
            self.cluster_id.as_str(),
            self.phones.as_str(),
            self.voicemails.as_str(),
        ]
    }
}
