//! Integration tests for selector parsing.

use sift_selector::parser::check_supported;
use sift_selector::{
    Combinator, ComplexSelector, EngineFunction, FunctionArgument, LexError, ParseErrorKind,
    SelectorError, SelectorList, SelectorParser, SimpleSelector, parse_selector, tokenize,
};

fn parse(input: &str) -> SelectorList {
    parse_selector(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"))
}

/// The only simple selector of a one-part, one-alternative selector.
fn single(input: &str) -> SimpleSelector {
    let list = parse(input);
    assert_eq!(list.selectors.len(), 1, "{input:?}");
    assert_eq!(list.selectors[0].parts.len(), 1, "{input:?}");
    list.selectors[0].parts[0].selector.clone()
}

fn parse_error(input: &str) -> ParseErrorKind {
    match parse_selector(input) {
        Err(SelectorError::Parse { kind, selector }) => {
            assert_eq!(selector, input);
            kind
        }
        other => panic!("expected a parse error for {input:?}, got {other:?}"),
    }
}

fn unsupported_token(input: &str) -> String {
    match parse_selector(input) {
        Err(SelectorError::UnsupportedToken { token, selector }) => {
            assert_eq!(selector, input);
            token
        }
        other => panic!("expected an unsupported token for {input:?}, got {other:?}"),
    }
}

fn raw(selector: &SimpleSelector) -> Option<&str> {
    selector.raw_text.as_deref()
}

fn complex(argument: &FunctionArgument) -> &ComplexSelector {
    argument
        .as_selector()
        .unwrap_or_else(|| panic!("expected a selector argument, got {argument:?}"))
}

// Basic selectors

#[test]
fn test_parse_type_selector() {
    let list = parse("div");
    assert_eq!(list.selectors.len(), 1);
    let parts = &list.selectors[0].parts;
    assert_eq!(parts.len(), 1);
    assert_eq!(raw(&parts[0].selector), Some("div"));
    assert!(parts[0].selector.functions.is_empty());
    assert_eq!(parts[0].combinator, Combinator::Descendant);
}

#[test]
fn test_parse_universal_selector() {
    assert_eq!(raw(&single("*")), Some("*"));
}

#[test]
fn test_parse_compound_selector_is_verbatim() {
    let simple = single("div.item#main[data-x=\"1\"]:hover");
    assert_eq!(raw(&simple), Some("div.item#main[data-x=\"1\"]:hover"));
    assert!(simple.functions.is_empty());
}

#[test]
fn test_parse_attribute_selector_keeps_inner_whitespace() {
    assert_eq!(raw(&single("[ title = 'a b' ]")), Some("[ title = 'a b' ]"));
}

// Combinators

#[test]
fn test_parse_child_combinator() {
    let list = parse("div > span");
    let parts = &list.selectors[0].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(raw(&parts[0].selector), Some("div"));
    assert_eq!(parts[0].combinator, Combinator::Child);
    assert_eq!(raw(&parts[1].selector), Some("span"));
    assert_eq!(parts[1].combinator, Combinator::Descendant);
}

#[test]
fn test_parse_combinators_without_whitespace() {
    assert_eq!(parse("div>span"), parse("div > span"));
    assert_eq!(parse("a+b~c"), parse("a + b ~ c"));
}

#[test]
fn test_parse_descendant_combinator() {
    let list = parse("ul  li");
    let parts = &list.selectors[0].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].combinator, Combinator::Descendant);
    assert_eq!(raw(&parts[1].selector), Some("li"));
}

#[test]
fn test_parse_sibling_combinators() {
    let list = parse("a + b ~ c d");
    let combinators: Vec<Combinator> = list.selectors[0]
        .parts
        .iter()
        .map(|part| part.combinator)
        .collect();
    assert_eq!(
        combinators,
        vec![
            Combinator::NextSibling,
            Combinator::SubsequentSibling,
            Combinator::Descendant,
            Combinator::Descendant,
        ]
    );
}

#[test]
fn test_last_part_never_carries_a_combinator() {
    for input in ["a > b", "a + b ~ c", "a b", ":has(a > b) > c"] {
        let list = parse(input);
        for selector in &list.selectors {
            let last = selector.parts.last().unwrap();
            assert!(last.combinator.is_descendant(), "{input:?}");
        }
    }
}

// Selector lists

#[test]
fn test_parse_selector_list() {
    let list = parse("a, b");
    assert_eq!(list.selectors.len(), 2);
    assert_eq!(raw(&list.selectors[0].parts[0].selector), Some("a"));
    assert_eq!(raw(&list.selectors[1].parts[0].selector), Some("b"));
}

#[test]
fn test_parse_selector_list_whitespace() {
    assert_eq!(parse("  a ,  b  "), parse("a,b"));
}

// Pseudo-classes

#[test]
fn test_builtin_pseudo_class_is_verbatim() {
    let simple = single(":hover");
    assert_eq!(raw(&simple), Some(":hover"));
    assert!(simple.functions.is_empty());
}

#[test]
fn test_builtin_pseudo_class_is_case_insensitive() {
    let simple = single("a:FIRST-CHILD");
    assert_eq!(raw(&simple), Some("a:FIRST-CHILD"));
    assert!(simple.functions.is_empty());
}

#[test]
fn test_builtin_pseudo_function_is_verbatim() {
    let simple = single(":nth-child(2n+1)");
    assert_eq!(raw(&simple), Some(":nth-child(2n+1)"));
    assert!(simple.functions.is_empty());
}

#[test]
fn test_builtin_pseudo_function_keeps_nested_parens() {
    let simple = single("li:nth-child( 2n + 1 of (x) )");
    assert_eq!(raw(&simple), Some("li:nth-child( 2n + 1 of (x) )"));
}

#[test]
fn test_builtin_pseudo_function_name_is_lowercased() {
    assert_eq!(raw(&single(":NTH-CHILD(2)")), Some(":nth-child(2)"));
}

// Engine functions

#[test]
fn test_engine_function_with_string_argument() {
    let simple = single(":has-text(\"foo\")");
    assert_eq!(simple.raw_text, None);
    assert_eq!(
        simple.functions,
        vec![EngineFunction {
            name: "has-text".to_string(),
            args: vec![FunctionArgument::String("foo".to_string())],
        }]
    );
}

#[test]
fn test_engine_function_without_arguments() {
    let simple = single("button:visible");
    assert_eq!(raw(&simple), Some("button"));
    assert_eq!(
        simple.functions,
        vec![EngineFunction {
            name: "visible".to_string(),
            args: Vec::new(),
        }]
    );
}

#[test]
fn test_engine_function_name_is_lowercased() {
    let simple = single(":Has-Text('x')");
    assert_eq!(simple.functions[0].name, "has-text");
}

#[test]
fn test_engine_function_mixed_arguments() {
    let simple = single(":nth-match( div , 2, -1.5, 'x' )");
    let function = &simple.functions[0];
    assert_eq!(function.name, "nth-match");
    assert_eq!(function.args.len(), 4);
    assert_eq!(raw(&complex(&function.args[0]).parts[0].selector), Some("div"));
    assert_eq!(function.args[1], FunctionArgument::Number(2.0));
    assert_eq!(function.args[2], FunctionArgument::Number(-1.5));
    assert_eq!(function.args[3], FunctionArgument::String("x".to_string()));
}

#[test]
fn test_engine_function_nested_selector() {
    let simple = single(":has(div > span:visible)");
    let function = &simple.functions[0];
    assert_eq!(function.name, "has");
    assert_eq!(function.args.len(), 1);

    let nested = complex(&function.args[0]);
    assert_eq!(nested.parts.len(), 2);
    assert_eq!(raw(&nested.parts[0].selector), Some("div"));
    assert_eq!(nested.parts[0].combinator, Combinator::Child);
    assert_eq!(raw(&nested.parts[1].selector), Some("span"));
    assert_eq!(nested.parts[1].selector.functions[0].name, "visible");
}

#[test]
fn test_engine_functions_inside_native_pseudo_syntax() {
    // `not`, `is` and `has` are not in the built-in tables: they are parsed
    // structurally.
    let simple = single("a:not(.b, .c)");
    assert_eq!(raw(&simple), Some("a"));
    let function = &simple.functions[0];
    assert_eq!(function.name, "not");
    assert_eq!(function.args.len(), 2);
    assert_eq!(raw(&complex(&function.args[1]).parts[0].selector), Some(".c"));
}

#[test]
fn test_raw_text_and_functions_combine() {
    let simple = single("div.card:has-text('x'):hover:visible");
    assert_eq!(raw(&simple), Some("div.card:hover"));
    let names: Vec<&str> = simple.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["has-text", "visible"]);
}

#[test]
fn test_function_names() {
    let list = parse(":has(:visible) :has-text('a'), b:visible");
    assert_eq!(list.function_names(), vec!["has", "visible", "has-text"]);
    assert!(parse("div > span:hover").function_names().is_empty());
}

#[test]
fn test_parse_is_deterministic() {
    let input = "section :has(a > b:text('x'), 3) ~ c, d";
    assert_eq!(parse(input), parse(input));
}

#[test]
fn test_parser_from_external_tokens_appends_eof() {
    let mut tokens = tokenize("div > span").unwrap();
    assert!(tokens.pop().is_some_and(|eof| eof.token.is_eof()));

    let list = SelectorParser::from_tokens("div > span", tokens)
        .unwrap()
        .parse_selector_list()
        .unwrap();
    assert_eq!(list, parse("div > span"));
}

#[test]
fn test_serde_json_shape() {
    let json = serde_json::to_value(parse("div > :f('x', 2)")).unwrap();
    assert_eq!(json[0]["parts"][0]["selector"]["rawText"], "div");
    assert_eq!(json[0]["parts"][0]["combinator"], ">");
    assert_eq!(json[0]["parts"][1]["combinator"], "");

    let second = &json[0]["parts"][1]["selector"];
    assert!(second.get("rawText").is_none());
    assert_eq!(second["functions"][0]["name"], "f");
    assert_eq!(second["functions"][0]["args"], serde_json::json!(["x", 2.0]));
}

// Parse errors

#[test]
fn test_empty_input_is_an_error() {
    assert_eq!(parse_error(""), ParseErrorKind::UnexpectedEnd);
}

#[test]
fn test_whitespace_only_input_is_an_error() {
    assert_eq!(parse_error("   "), ParseErrorKind::UnexpectedEnd);
}

#[test]
fn test_unterminated_constructs() {
    for input in [
        "[attr",
        ":fn(",
        "div >",
        "div > ",
        ":nth-child(2",
        ":has(a",
        ":has(a b",
        ":has-text('x'",
        "a,",
    ] {
        assert_eq!(parse_error(input), ParseErrorKind::UnexpectedEnd, "{input:?}");
    }
}

#[test]
fn test_unexpected_tokens() {
    let cases = [
        ("div)", ")"),
        ("div..a", "."),
        ("div::before", ":"),
        ("10px", "10px"),
        ("> div", ">"),
        (":fn(a]", "]"),
        (":fn('x' 'y')", "'y'"),
        ("a:has-text('x' b)", "b"),
        ("a. b", " "),
        ("a#b!", "!"),
    ];
    for (input, token) in cases {
        assert_eq!(
            parse_error(input),
            ParseErrorKind::UnexpectedToken(token.to_string()),
            "{input:?}"
        );
    }
}

#[test]
fn test_top_level_literal_is_not_a_selector() {
    assert_eq!(parse_error("42"), ParseErrorKind::NotASelector);
    assert_eq!(parse_error("'foo'"), ParseErrorKind::NotASelector);
    assert_eq!(parse_error("div, 'foo'"), ParseErrorKind::NotASelector);
}

#[test]
fn test_parse_error_message() {
    let error = parse_selector("div)").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unexpected token \")\" while parsing css selector \"div)\". Did you mean to CSS.escape it?"
    );
    assert_eq!(error.selector(), "div)");

    let error = parse_selector("div >").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unexpected end of input while parsing css selector \"div >\". Did you mean to CSS.escape it?"
    );

    let error = parse_selector("42").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Error while parsing css selector \"42\". Did you mean to CSS.escape it?"
    );
}

// Unsupported tokens

#[test]
fn test_unsupported_tokens() {
    let cases = [
        ("@media", "@media"),
        ("div;", ";"),
        ("div { }", "{"),
        ("div }", "}"),
        (":f(50%)", "50%"),
        (":f(url(x))", "url(x)"),
        ("a || b", "||"),
        ("<!-- a", "<!--"),
        ("a -->", "-->"),
        ("[href^=http]", "^="),
        ("[class~=a]", "~="),
        ("[lang|=en]", "|="),
        ("[src$=png]", "$="),
        ("[title*=x]", "*="),
        ("'abc\n'", "'abc"),
    ];
    for (input, token) in cases {
        assert_eq!(unsupported_token(input), token, "{input:?}");
    }
}

#[test]
fn test_unsupported_token_reported_before_grammar_errors() {
    // `)` would be a grammar error, but the guard runs first.
    assert_eq!(unsupported_token("div) ;"), ";");
}

#[test]
fn test_unsupported_token_message() {
    let error = parse_selector("[href^=http]").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unsupported token \"^=\" while parsing css selector \"[href^=http]\". Did you mean to CSS.escape it?"
    );
}

#[test]
fn test_guard_is_idempotent() {
    for input in ["div > span", "a; b", "[a^=b] {"] {
        let tokens = tokenize(input).unwrap();
        let first = check_supported(&tokens, input);
        let second = check_supported(&tokens, input);
        assert_eq!(first, second, "{input:?}");
    }
}

// Lexical errors

#[test]
fn test_lex_error_is_wrapped() {
    let error = parse_selector("div /* x").unwrap_err();
    assert_eq!(
        error,
        SelectorError::Lex {
            source: LexError::UnterminatedComment { offset: 4 },
            selector: "div /* x".to_string(),
        }
    );
    assert_eq!(
        error.to_string(),
        "Unterminated comment at offset 4 while parsing css selector \"div /* x\". Did you mean to CSS.escape it?"
    );
    let source = std::error::Error::source(&error).unwrap();
    assert_eq!(source.to_string(), "Unterminated comment at offset 4");
}
