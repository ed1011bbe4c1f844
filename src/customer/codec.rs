//! Line encoding for the flat-file store
//!
//! One customer per line, 10 fields joined by `|` in fixed order:
//!
//! ```text
//! name|dd-MM-yyyy|sex|rg|cpf|address|city|state|phone|email
//! ```
//!
//! There is no escaping: a `|` inside a value would shift every field
//! after it, which is why the registry refuses to store such values.

use std::str::Utf8Error;

use chrono::NaiveDate;
use thiserror::Error;

use super::Customer;

/// Field separator.
pub const DELIMITER: char = '|';

/// Fields per line.
pub const FIELD_COUNT: usize = 10;

/// Birth date format (`dd-MM-yyyy`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Why a line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected 10 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid birth date '{0}'")]
    BirthDate(String),

    #[error("line is not valid UTF-8: {0}")]
    Encoding(Utf8Error),
}

/// Encodes a customer as a single line, without the trailing newline.
pub fn encode_line(c: &Customer) -> String {
    let birth_date = c.birth_date.format(DATE_FORMAT).to_string();
    let fields: [&str; FIELD_COUNT] = [
        &c.name,
        &birth_date,
        &c.sex,
        &c.rg,
        &c.cpf,
        &c.address,
        &c.city,
        &c.state,
        &c.phone,
        &c.email,
    ];
    fields.join("|")
}

/// Decodes one line.
pub fn decode_line(line: &str) -> Result<Customer, DecodeError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [name, birth_date, sex, rg, cpf, address, city, state, phone, email] = fields[..] else {
        return Err(DecodeError::FieldCount(fields.len()));
    };

    let birth_date = NaiveDate::parse_from_str(birth_date, DATE_FORMAT)
        .map_err(|_| DecodeError::BirthDate(birth_date.to_string()))?;

    Ok(Customer {
        name: name.to_string(),
        birth_date,
        sex: sex.to_string(),
        rg: rg.to_string(),
        cpf: cpf.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    })
}
