use spirv_asm::text::TextCursor;
use spirv_asm::Position;

/// Reads the first word of `text` and returns it with the position just past it.
fn first_word(text: &str) -> (&str, Position) {
  let mut cursor = TextCursor::new(text);
  let word = cursor.word();
  (word, cursor.position())
}

#[test]
fn words_end_at_separators() {
  assert_eq!(first_word("Word"), ("Word", Position::new(0, 4, 4)));
  assert_eq!(first_word("Word\t"), ("Word", Position::new(0, 4, 4)));
  assert_eq!(first_word("Word "), ("Word", Position::new(0, 4, 4)));
  assert_eq!(first_word("Word\n"), ("Word", Position::new(0, 4, 4)));
  assert_eq!(first_word("Wo;rd"), ("Wo", Position::new(0, 2, 2)));
}

#[test]
fn multiple_words() {
  let mut cursor = TextCursor::new("Words in a sentence");
  let mut words = Vec::new();
  while cursor.advance() {
    let start = cursor.position();
    let word = cursor.word();
    assert_eq!(cursor.position().column - start.column, word.len());
    assert_eq!(cursor.position().index - start.index, word.len());
    words.push(word);
  }
  assert_eq!(words, vec!["Words", "in", "a", "sentence"]);
  assert!(cursor.is_at_end());
}

#[test]
fn quotes_are_kept() {
  let mut cursor = TextCursor::new(r#""quotes" "around words""#);
  assert_eq!(cursor.word(), r#""quotes""#);
  assert_eq!(cursor.position(), Position::new(0, 8, 8));
  assert!(cursor.advance());
  assert_eq!(cursor.word(), r#""around words""#);
  assert_eq!(cursor.position(), Position::new(0, 23, 23));
}

#[test]
fn quotes_between_words_act_like_glue() {
  let mut cursor = TextCursor::new(r#"quotes" "between words"#);
  assert_eq!(cursor.word(), r#"quotes" "between"#);
  assert_eq!(cursor.position(), Position::new(0, 16, 16));
  assert!(cursor.advance());
  assert_eq!(cursor.word(), "words");
  assert_eq!(cursor.position(), Position::new(0, 22, 22));
}

#[test]
fn quoted_whitespace_stays_on_the_line() {
  let text = "\"white \n\t space\"";
  assert_eq!(first_word(text), (text, Position::new(0, text.len(), text.len())));
}

#[test]
fn lone_quotes_and_escapes() {
  assert_eq!(first_word("\""), ("\"", Position::new(0, 1, 1)));
  assert_eq!(first_word("\\"), ("\\", Position::new(0, 1, 1)));
  assert_eq!(first_word("word\\"), ("word\\", Position::new(0, 5, 5)));
}

#[test]
fn escapes_join_separators_into_the_word() {
  let text = "w\\\"o\\\nr\\;d";
  assert_eq!(first_word(text), (text, Position::new(0, 10, 10)));
  assert_eq!(first_word("word\\\\ abc"), ("word\\\\", Position::new(0, 6, 6)));
}

#[test]
fn advance_counts_lines() {
  let mut cursor = TextCursor::new("; comment\n\n  OpNop ; trailing");
  assert!(cursor.advance());
  assert_eq!(cursor.position(), Position::new(2, 2, 13));
  assert_eq!(cursor.word(), "OpNop");
  assert!(!cursor.advance());
  assert!(cursor.is_at_end());
}

#[test]
fn instruction_starts() {
  assert!(TextCursor::new("OpNop").is_start_of_new_instruction());
  assert!(TextCursor::new("%x = OpTypeVoid").is_start_of_new_instruction());
  assert!(!TextCursor::new("%x %y").is_start_of_new_instruction());
  assert!(!TextCursor::new("%x = 5").is_start_of_new_instruction());
  assert!(!TextCursor::new("Opcode").is_start_of_new_instruction());
  assert!(!TextCursor::new("Nop").is_start_of_new_instruction());
}
