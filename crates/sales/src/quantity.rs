use fruitshop_core::ValidationError;

/// Parse operator-entered quantity text into a positive count.
///
/// Surrounding whitespace is ignored and a leading sign is accepted. Values
/// outside the 32-bit signed range count as unparsable.
pub fn parse_quantity(text: &str) -> Result<u32, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyQuantity);
    }

    let value: i32 = text
        .parse()
        .map_err(|_| ValidationError::NotANumber(text.to_string()))?;

    if value <= 0 {
        return Err(ValidationError::NonPositive(i64::from(value)));
    }

    // Positive i32 always fits.
    Ok(value.unsigned_abs())
}
