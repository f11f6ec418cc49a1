//! Field tokenizer
//!
//! Splits a request line into `KEY:VALUE` pairs. A key runs up to the first
//! `:`, its value runs from there up to the next `,`. Neither may contain a
//! delimiter; there is no escaping.

/// One `KEY:VALUE` pair borrowed from a request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Field<'a> {
    pub fn new(key: &'a str, value: &'a str) -> Self {
        Self { key, value }
    }
}

/// Take the next pair off the front of `input`.
///
/// Returns `None` when `input` is empty, otherwise the pair and whatever
/// follows it. The consumed span is `key + value + 2` bytes (both
/// delimiters), clamped to the input, so a trailing pair without a `,`, or a
/// key without a `:`, leaves an empty remainder.
pub fn next_field(input: &str) -> Option<(Field<'_>, &str)> {
    if input.is_empty() {
        return None;
    }

    let key_len = input.find(':').unwrap_or(input.len());
    let key = &input[..key_len];

    let value_start = (key_len + 1).min(input.len());
    let rest = &input[value_start..];
    let value_len = rest.find(',').unwrap_or(rest.len());
    let value = &rest[..value_len];

    let consumed = (key_len + value_len + 2).min(input.len());
    Some((Field::new(key, value), &input[consumed..]))
}

/// Lazy iterator over the pairs of a request line
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    remaining: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { remaining: input }
    }

    /// The unconsumed tail of the line
    pub fn remaining(&self) -> &'a str {
        self.remaining
    }

    /// Look at the next pair without consuming it
    pub fn peek(&self) -> Option<Field<'a>> {
        next_field(self.remaining).map(|(field, _)| field)
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (field, rest) = next_field(self.remaining)?;
        self.remaining = rest;
        Some(field)
    }
}

/// Iterate over every pair in `input`
pub fn fields(input: &str) -> Fields<'_> {
    Fields::new(input)
}
