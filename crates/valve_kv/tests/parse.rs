use pretty_assertions::assert_eq;
use tracing_test::traced_test;
use valve_kv::{error::Error, error::Result, KeyValues};

#[test]
fn duplicate_value_keeps_first() -> Result<()> {
    let kv = KeyValues::from_text("\"x\" \"1\"\n\"x\" \"2\"\n\"X\" \"3\"\n")?;

    assert_eq!(kv.len(), 1);
    assert_eq!(kv.find("x").unwrap().as_str(), "1");

    Ok(())
}

#[test]
fn duplicate_block_merges() -> Result<()> {
    let kv = KeyValues::from_text(
        r#"
"a"
{
    "b" "1"
}
"A"
{
    "c" "2"
    "b" "ignored"
}
"#,
    )?;

    assert_eq!(kv.len(), 1);
    let a = kv.find_block("a").unwrap();
    assert_eq!(a.key(), "a");
    assert_eq!(a.len(), 2);
    assert_eq!(a.find("b").unwrap().as_str(), "1");
    assert_eq!(a.find("c").unwrap().as_str(), "2");

    Ok(())
}

#[test]
fn block_colliding_with_value_is_dropped() -> Result<()> {
    let kv = KeyValues::from_text(
        r#"
"a" "value"
"a"
{
    "inner" "1"
}
"after" "2"
"#,
    )?;

    assert_eq!(kv.find("a").unwrap().as_str(), "value");
    assert!(kv.find_recursive("inner").is_none());
    assert_eq!(kv.find("after").unwrap().as_str(), "2");

    Ok(())
}

#[test]
fn case_insensitive_lookup() -> Result<()> {
    let kv = KeyValues::from_text("\"SFUI_Title\" \"Counter-Strike\"\n")?;

    let exact = kv.find("SFUI_Title").unwrap();
    assert_eq!(kv.find("sfui_title"), Some(exact));
    assert_eq!(kv.find("SFUI_TITLE"), Some(exact));
    assert_eq!(exact.key(), "SFUI_Title");

    Ok(())
}

#[test]
fn comments_and_conditionals_are_skipped() -> Result<()> {
    let kv = KeyValues::from_text(
        r#"
// leading comment
"settings" // trailing comment
{
    "fov"   "90"    [$WIN32]
    "fov"   "75"    [$X360]
    //"hidden" "1"
}
"#,
    )?;

    let settings = kv.find_block("settings").unwrap();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings.find("fov").unwrap().as_str(), "90");
    assert!(settings.find("hidden").is_none());

    Ok(())
}

#[test]
fn comment_between_key_and_value() -> Result<()> {
    let kv = KeyValues::from_text(
        "\"settings\" // c\n{\n\"fov\" // also here\n\"90\"\n}\n\"next\" \"1\"\n",
    )?;

    let settings = kv.find_block("settings").unwrap();
    assert_eq!(settings.find("fov").unwrap().as_str(), "90");
    assert_eq!(kv.find("next").unwrap().as_str(), "1");

    Ok(())
}

#[test]
fn quote_after_escaped_backslash_continues_string() -> Result<()> {
    let kv = KeyValues::from_text("\"path\" \"C:\\\\\"\n\"next\" \"1\"\n\"after\" \"2\"\n")?;

    assert_eq!(kv.find("path").unwrap().as_str(), "C:\\\\\"\n");
    assert!(kv.find("next").is_none());
    assert_eq!(kv.find("after").unwrap().as_str(), "2");

    Ok(())
}

#[test]
fn escaped_quotes_and_multiline_values() -> Result<()> {
    let kv = KeyValues::from_text("\"desc\" \"He said \\\"go\\\"\nand left\"\n\"next\" \"1\"\n")?;

    assert_eq!(
        kv.find("desc").unwrap().as_str(),
        "He said \\\"go\\\"\nand left"
    );
    assert_eq!(kv.find("next").unwrap().as_str(), "1");

    Ok(())
}

#[test]
fn empty_input() -> Result<()> {
    assert!(KeyValues::from_text("")?.is_empty());
    assert!(KeyValues::from_text("  \r\n\t// nothing here\n")?.is_empty());
    Ok(())
}

#[test]
fn deep_nesting() -> Result<()> {
    let depth = 10_000;
    let text = "\"k\" {\n".repeat(depth) + &"}\n".repeat(depth);
    let kv = KeyValues::from_text(text)?;

    let mut node = kv.find_block("k").unwrap();
    let mut seen = 1;
    while let Some(child) = node.find_block("k") {
        node = child;
        seen += 1;
    }
    assert_eq!(seen, depth);

    Ok(())
}

#[traced_test]
#[test]
fn unterminated_string() {
    let result = KeyValues::from_text("\"a\"\n{\n\"b\" \"never closed\n}\n");
    assert!(matches!(
        result,
        Err(Error::UnterminatedString { line: 3, .. })
    ));
}

#[traced_test]
#[test]
fn unexpected_character() {
    let result = KeyValues::from_text("\"a\" \"1\"\n\n  value\n");
    match result {
        Err(Error::UnexpectedCharacter { found, line, .. }) => {
            assert_eq!(found, 'v');
            assert_eq!(line, 3);
        }
        other => panic!("expected an unexpected character error, got {other:?}"),
    }
}

#[traced_test]
#[test]
fn unbalanced_close() {
    let result = KeyValues::from_text("\"a\" \"1\"\n}\n");
    assert!(matches!(result, Err(Error::UnbalancedBlock { line: 2, .. })));
}

#[traced_test]
#[test]
fn unclosed_block() {
    let result = KeyValues::from_text("\"a\"\n{\n\"b\"\n{\n");
    assert!(matches!(result, Err(Error::UnclosedBlock { open: 2, .. })));
}

#[test]
fn single_slash_is_an_error() {
    let result = KeyValues::from_text("/ not a comment\n");
    assert!(matches!(
        result,
        Err(Error::UnexpectedCharacter { found: '/', .. })
    ));
}

#[test]
fn key_without_value_is_dropped() -> Result<()> {
    let kv = KeyValues::from_text("\"block\"\n{\n\"orphan\"\n}\n")?;
    assert!(kv.find_block("block").unwrap().is_empty());
    Ok(())
}
