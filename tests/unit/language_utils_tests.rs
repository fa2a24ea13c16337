/*!
 * Tests for language utility functions
 */

use anyhow::Result;
use cuetrack::language_utils::{
    get_language_name, normalize_language_code, validate_language_code, LanguageCodeType,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    // ISO 639-1 tests
    assert!(matches!(validate_language_code("en").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("ja").unwrap(), LanguageCodeType::Part1));

    // ISO 639-2/T tests
    assert!(matches!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("deu").unwrap(), LanguageCodeType::Part2T));

    // ISO 639-2/B tests
    assert!(matches!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B));
    assert!(matches!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B));

    // Whitespace and case tests
    assert!(matches!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("ENG").unwrap(), LanguageCodeType::Part2T));

    // Invalid codes
    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalizeLanguageCode_withAnyForm_shouldPreferTwoLetterCode() -> Result<()> {
    assert_eq!(normalize_language_code("en")?, "en");
    assert_eq!(normalize_language_code("eng")?, "en");
    assert_eq!(normalize_language_code("FRE")?, "fr");
    assert_eq!(normalize_language_code(" ger ")?, "de");

    // No two-letter form exists for Hawaiian
    assert_eq!(normalize_language_code("haw")?, "haw");
    Ok(())
}

#[test]
fn test_getLanguageName_withKnownCodes_shouldReturnEnglishName() -> Result<()> {
    assert_eq!(get_language_name("ja")?, "Japanese");
    assert_eq!(get_language_name("fra")?, "French");
    assert_eq!(get_language_name("ger")?, "German");
    assert!(get_language_name("zz").is_err());
    Ok(())
}
