//! Customer record model
//!
//! `Customer` is the single persisted entity. `CustomerPatch` is the
//! change set applied by updates: every field is optional and only the
//! fields that are present overwrite the stored value.

mod codec;

pub use codec::{decode_line, encode_line, DecodeError, DATE_FORMAT, DELIMITER, FIELD_COUNT};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Characters that cannot appear in any stored field.
const FORBIDDEN_CHARS: [char; 3] = [DELIMITER, '\n', '\r'];

/// One customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub sex: String,
    /// National ID document number (RG)
    #[serde(default)]
    pub rg: String,
    /// Taxpayer identifier, the natural key
    pub cpf: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Customer {
    /// Returns the first field whose value cannot be stored in a line,
    /// with the offending character.
    pub fn unstorable_field(&self) -> Option<(&'static str, char)> {
        self.text_fields()
            .into_iter()
            .find_map(|(name, value)| forbidden_char(value).map(|c| (name, c)))
    }

    fn text_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("name", self.name.as_str()),
            ("sex", self.sex.as_str()),
            ("rg", self.rg.as_str()),
            ("cpf", self.cpf.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
        ]
    }
}

/// Change set for a partial update.
///
/// `None` leaves the stored value untouched. `Some("")` clears it.
/// The CPF is the key and cannot be changed through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub rg: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CustomerPatch {
    /// True if the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the first supplied field whose value cannot be stored.
    pub fn unstorable_field(&self) -> Option<(&'static str, char)> {
        let fields = [
            ("name", &self.name),
            ("sex", &self.sex),
            ("rg", &self.rg),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("phone", &self.phone),
            ("email", &self.email),
        ];
        fields.into_iter().find_map(|(name, value)| {
            value
                .as_deref()
                .and_then(forbidden_char)
                .map(|c| (name, c))
        })
    }

    /// Overwrites the fields of `customer` that this patch supplies.
    pub fn apply_to(&self, customer: &mut Customer) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }

        set(&mut customer.name, &self.name);
        if let Some(date) = self.birth_date {
            customer.birth_date = date;
        }
        set(&mut customer.sex, &self.sex);
        set(&mut customer.rg, &self.rg);
        set(&mut customer.address, &self.address);
        set(&mut customer.city, &self.city);
        set(&mut customer.state, &self.state);
        set(&mut customer.phone, &self.phone);
        set(&mut customer.email, &self.email);
    }
}

fn forbidden_char(value: &str) -> Option<char> {
    value.chars().find(|c| FORBIDDEN_CHARS.contains(c))
}
