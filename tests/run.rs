use stackword::*;
use test_case::test_case;

macro_rules! valid {
    ( $name:ident $(, $value:expr )* ) => {
        #[test]
        fn $name() {
            let source = {
                include_str!(concat!("valid/", stringify!($name), ".fth"))
            };

            let mut env = Env::new();
            for line in source.lines() {
                env.eval_line(line).unwrap();
            }
            env.finish().unwrap();
            assert_eq!(env.view(), &[ $( $value ),* ] as &[i32]);
        }
    };
}

macro_rules! invalid {
    ( $name:ident, $err:expr ) => {
        #[test]
        fn $name() {
            let source = {
                include_str!(concat!("invalid/", stringify!($name), ".fth"))
            };

            assert_eq!(evaluate(source.lines()), Err($err));
        }
    };
}

valid!(push_only, 1, 2, 3, 4, 5);
valid!(double, 6);
valid!(redefine, 2);
valid!(forward_reference, 5);
valid!(nested_words, 4, 23);
valid!(empty);

invalid!(underflow, EvalErr::StackUnderflow);
invalid!(divide_by_zero, EvalErr::DivisionByZero);
invalid!(unknown_token, EvalErr::UnknownToken("frob".to_owned()));
invalid!(stray_semicolon, EvalErr::MalformedDefinition(Malformed::StraySemicolon));
invalid!(unterminated, EvalErr::MalformedDefinition(Malformed::Unterminated {
    name: Some("sq".to_owned()),
}));
invalid!(overflow, EvalErr::Overflow);

#[test_case(&["1 2 3"], "1 2 3"; "pure push")]
#[test_case(&["-7 0 42"], "-7 0 42"; "negative numbers")]
#[test_case(&["5 3 -"], "2"; "subtract in push order")]
#[test_case(&["3 5 -"], "-2"; "subtract reversed")]
#[test_case(&["2 3 *"], "6"; "multiply")]
#[test_case(&["12 3 /"], "4"; "divide")]
#[test_case(&["7 2 /"], "3"; "divide truncates")]
#[test_case(&["-7 2 /"], "-3"; "divide truncates toward zero")]
#[test_case(&["1 2 + 4 *"], "12"; "chained arithmetic")]
#[test_case(&["1 dup"], "1 1"; "dup")]
#[test_case(&["1 2 drop"], "1"; "drop")]
#[test_case(&["1 2 swap"], "2 1"; "swap")]
#[test_case(&["1 2 over"], "1 2 1"; "over")]
#[test_case(&["1 DUP Dup"], "1 1 1"; "case insensitive")]
#[test_case(&[": swap dup ;", "1 swap"], "1 1"; "user word shadows primitive")]
#[test_case(&[": foo 5 ;", ": bar foo ;", ": foo 6 ;", "bar"], "6"; "body resolved at expansion")]
#[test_case(&[": foo 1 ;", ": bar foo foo + ;", "bar bar *"], "4"; "word used twice")]
#[test_case(&[": 1 2 ;", "1"], "2"; "numbers can be redefined")]
#[test_case(&[""], ""; "blank line")]
#[test_case(&[], ""; "no lines")]
fn evaluates(lines: &[&str], expected: &str) {
    assert_eq!(evaluate(lines).unwrap(), expected);
}

#[test_case(&["1 +"], EvalErr::StackUnderflow; "add one operand")]
#[test_case(&["drop"], EvalErr::StackUnderflow; "drop empty")]
#[test_case(&["1 swap"], EvalErr::StackUnderflow; "swap one operand")]
#[test_case(&["1 over"], EvalErr::StackUnderflow; "over one operand")]
#[test_case(&["-2147483648 -1 /"], EvalErr::Overflow; "min divided by minus one")]
#[test_case(&["1 foo"], EvalErr::UnknownToken("foo".to_owned()); "undefined word")]
#[test_case(&[": a b ;", "a"], EvalErr::UnknownToken("b".to_owned()); "undefined forward reference")]
#[test_case(&[":"], EvalErr::MalformedDefinition(Malformed::Unterminated { name: None }); "missing name")]
#[test_case(&[";"], EvalErr::MalformedDefinition(Malformed::StraySemicolon); "lone semicolon")]
#[test_case(&["1 2", "3 0 /", "4"], EvalErr::DivisionByZero; "error aborts remaining lines")]
fn fails(lines: &[&str], expected: EvalErr) {
    assert_eq!(evaluate(lines), Err(expected));
}

#[test]
fn mutual_recursion_hits_expansion_limit() {
    let limits = Limits { max_expansions: Some(1_000) };
    let result = evaluate_with(&[": a b ;", ": b a ;", "a"], limits);
    assert_eq!(result, Err(EvalErr::ExpansionLimit(1_000)));
}

#[test]
fn tokens_fed_one_at_a_time_keep_state() {
    let mut env = Env::new();
    for token in tokenize_lines(&[": inc 1 + ;", "41 inc"]) {
        env.eval_token(&token).unwrap();
    }
    assert_eq!(env.render(), "42");
    assert_eq!(env.to_string(), "42");
    assert_eq!(env.view(), &[42]);
}

#[test]
fn words_listed_in_definition_order() {
    let mut env = Env::new();
    env.eval_line(": b 2 ; : a 1 ; : b 3 ;").unwrap();
    let names: Vec<_> = env.words().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a"]);
}
