pub type Token = String;

pub type Program = Vec<Token>;

/// Split one source line into lowercase tokens.
pub fn tokenize(line: &str) -> Program {
    line.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

pub fn tokenize_lines<I, S>(lines: I) -> Program
    where I: IntoIterator<Item = S>, S: AsRef<str>
{
    let mut program = Vec::with_capacity(16);
    for line in lines {
        program.extend(tokenize(line.as_ref()));
    }
    program
}

#[test]
fn funky_word_breaks() {
    let inputs = vec![
        ("1 2 +", vec!["1", "2", "+"]),
        ("  dup\tDROP  ", vec!["dup", "drop"]),
        (": Foo SWAP ;", vec![":", "foo", "swap", ";"]),
        ("", vec![]),
    ];

    for (line, expected) in inputs {
        assert_eq!(tokenize(line), expected, "tokenizing {:?}", line);
    }
}

#[test]
fn lines_flatten_in_order() {
    let program = tokenize_lines(&[": sq dup * ;", "3 SQ"]);
    assert_eq!(program, vec![":", "sq", "dup", "*", ";", "3", "sq"]);
}
