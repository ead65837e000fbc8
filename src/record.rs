//! Recycler domain record and its serialization invariant.

use std::fmt;

/// Separator between fields on a serialized record line.
pub const FIELD_DELIMITER: char = ';';

/// One recycler contact entry.
///
/// All fields are free-form text and may be empty. None of them may contain
/// the field delimiter or a newline; [`Record::field_violation`] reports the
/// first field that would break the line format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Business name; also the sort and search key.
    pub business_name: String,
    /// Street address.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// Website address.
    pub website: String,
    /// Comma-separated products the business recycles.
    pub recycles: String,
}

impl Record {
    /// Builds a record from its five fields in line order.
    pub fn new(
        business_name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        website: impl Into<String>,
        recycles: impl Into<String>,
    ) -> Self {
        Self {
            business_name: business_name.into(),
            address: address.into(),
            phone: phone.into(),
            website: website.into(),
            recycles: recycles.into(),
        }
    }

    /// Returns the name of the first field that contains the delimiter or a
    /// line break, or `None` when the record is serializable.
    pub fn field_violation(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, value)| {
                value.contains(FIELD_DELIMITER) || value.contains('\n') || value.contains('\r')
            })
            .map(|(name, _)| name)
    }

    /// True when `business_name` contains `needle`, ignoring case.
    pub fn name_contains(&self, needle: &str) -> bool {
        contains_ignore_case(&self.business_name, needle)
    }

    /// True when `recycles` contains `keyword`, ignoring case.
    pub fn recycles_contains(&self, keyword: &str) -> bool {
        contains_ignore_case(&self.recycles, keyword)
    }

    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("business_name", self.business_name.as_str()),
            ("address", self.address.as_str()),
            ("phone", self.phone.as_str()),
            ("website", self.website.as_str()),
            ("recycles", self.recycles.as_str()),
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{delim}{}{delim}{}{delim}{}{delim}{}",
            self.business_name,
            self.address,
            self.phone,
            self.website,
            self.recycles,
            delim = FIELD_DELIMITER,
        )
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
