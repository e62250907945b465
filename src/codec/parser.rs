// nom parsers for the big-endian primitives of the Timer encoding

use nom::{bytes::complete::take, IResult};

/// Parse an i32 big-endian
pub fn parse_i32_be(input: &[u8]) -> IResult<&[u8], i32> {
    let (input, bytes) = take(4usize)(input)?;
    Ok((
        input,
        i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    ))
}

/// Parse a u32 big-endian
pub fn parse_u32_be(input: &[u8]) -> IResult<&[u8], u32> {
    let (input, bytes) = take(4usize)(input)?;
    Ok((
        input,
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    ))
}

/// Parse an IEEE-754 binary32 big-endian
pub fn parse_f32_be(input: &[u8]) -> IResult<&[u8], f32> {
    let (input, bytes) = take(4usize)(input)?;
    Ok((
        input,
        f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    ))
}

/// Parse an IEEE-754 binary64 big-endian
pub fn parse_f64_be(input: &[u8]) -> IResult<&[u8], f64> {
    let (input, bytes) = take(8usize)(input)?;
    Ok((
        input,
        f64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]),
    ))
}

/// Parse a fixed-length byte block
pub fn parse_char_array(len: usize) -> impl Fn(&[u8]) -> IResult<&[u8], &[u8]> {
    move |input: &[u8]| take(len)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_i32_be() {
        let data = [0xFF, 0xFF, 0xFF, 0xFE, 0xAA];
        let (rest, value) = parse_i32_be(&data).unwrap();
        assert_eq!(value, -2);
        assert_eq!(rest, &[0xAA]);
    }

    #[test]
    fn test_parse_u32_be() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let (_, value) = parse_u32_be(&data).unwrap();
        assert_eq!(value, 0x12345678);
    }

    #[test]
    fn test_parse_floats_be() {
        let (_, value) = parse_f32_be(&1.5f32.to_be_bytes()).unwrap();
        assert_eq!(value, 1.5);

        let (_, value) = parse_f64_be(&(-0.25f64).to_be_bytes()).unwrap();
        assert_eq!(value, -0.25);
    }

    #[test]
    fn test_parse_char_array() {
        let data = b"PKS\0\0extra";
        let (rest, bytes) = parse_char_array(5)(data).unwrap();
        assert_eq!(bytes, b"PKS\0\0");
        assert_eq!(rest, b"extra");
    }

    #[test]
    fn test_insufficient_input() {
        let data = [0x12, 0x34];
        assert!(parse_i32_be(&data).is_err());
        assert!(parse_f64_be(&data).is_err());
        assert!(parse_char_array(3)(&data).is_err());
    }
}
