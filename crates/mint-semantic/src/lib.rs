//! Mint semantic analyzer: rejects ill-typed or ill-scoped programs before
//! they run.

pub mod analyzer;

pub use analyzer::{arith_result, check, Analyzer};

#[cfg(test)]
mod tests {
    use super::*;
    use mint_lexer::Lexer;
    use mint_parser::Parser;
    use mint_syntax::ast::{ArithOp, SymbolTable, Type};
    use mint_syntax::error::{Error, ErrorKind};

    fn check_src(input: &str) -> Result<SymbolTable, Error> {
        let tokens = Lexer::new(input, "test.mt").tokenize().expect("Lexing should succeed");
        let program = Parser::new(tokens).parse_program().expect("Parsing should succeed");
        check(&program.statements, &SymbolTable::new())
    }

    fn expect_ok(input: &str) -> SymbolTable {
        match check_src(input) {
            Ok(symbols) => symbols,
            Err(e) => panic!("Check failed: {}\nInput: {}", e, input),
        }
    }

    fn expect_error(input: &str, msg: &str) -> Error {
        match check_src(input) {
            Ok(_) => panic!("Expected error but check passed: {}", input),
            Err(e) => {
                assert_eq!(e.kind, ErrorKind::Semantic);
                assert_eq!(e.msg, msg, "Input: {}", input);
                e
            }
        }
    }

    #[test]
    fn test_declarations_enter_the_table() {
        let symbols = expect_ok("int a = 1; double b = 2.5; str s = \"x\"; bool f = true; int u;");
        assert_eq!(symbols.get("a"), Some(&Type::Int));
        assert_eq!(symbols.get("b"), Some(&Type::Double));
        assert_eq!(symbols.get("s"), Some(&Type::Str));
        assert_eq!(symbols.get("f"), Some(&Type::Bool));
        assert_eq!(symbols.get("u"), Some(&Type::Int));
    }

    #[test]
    fn test_redeclaration_and_undefined() {
        expect_error("int x = 1; int x = 2;", "Variable `x` is already defined");
        expect_error("y = 3;", "Undefined variable: `y`");
        expect_error("y;", "Undefined variable: `y`");
        expect_error("print(z);", "variable `z` is not defined");
    }

    #[test]
    fn test_no_implicit_promotion() {
        let err = expect_error(
            "int x = 2.5;",
            "A value of type `double` can't be assigned to a variable of type `int`",
        );
        assert_eq!((err.line, err.col), (Some(1), Some(1)));
        expect_error(
            "double d = 1;",
            "A value of type `int` can't be assigned to a variable of type `double`",
        );
        expect_error(
            "int x = 1; x = \"s\";",
            "A value of type `str` can't be assigned to a variable of type `int`",
        );
    }

    #[test]
    fn test_name_is_visible_in_its_initializer() {
        expect_ok("int x = x + 1;");
    }

    #[test]
    fn test_arithmetic_typing() {
        assert_eq!(arith_result(ArithOp::Add, Type::Str, Type::Str), Some(Type::Str));
        assert_eq!(arith_result(ArithOp::Mul, Type::Str, Type::Int), Some(Type::Str));
        assert_eq!(arith_result(ArithOp::Mul, Type::Int, Type::Str), Some(Type::Str));
        assert_eq!(arith_result(ArithOp::Add, Type::Int, Type::Double), Some(Type::Double));
        assert_eq!(arith_result(ArithOp::Div, Type::Int, Type::Int), Some(Type::Int));
        assert_eq!(arith_result(ArithOp::Sub, Type::Str, Type::Str), None);
        assert_eq!(arith_result(ArithOp::Add, Type::Str, Type::Int), None);
        assert_eq!(arith_result(ArithOp::Mul, Type::Str, Type::Double), None);
        assert_eq!(arith_result(ArithOp::Add, Type::Bool, Type::Bool), None);

        expect_ok("str s = \"ab\" * 3; str t = \"a\" + \"b\"; double d = 1 + 2.0; int q = 7 / 2;");
        expect_error("int x = 1 + true;", "Error while evaluating expression");
        expect_error("str s = \"a\" - \"b\";", "Error while evaluating expression");
    }

    #[test]
    fn test_relational_logical_and_ternary() {
        expect_ok("bool b = 1 < 2; bool c = \"a\" == \"b\"; bool d = b && c || true;");
        expect_ok("bool f = true; int x = f ? 1 : 2;");
        expect_error("bool b = 1 < 2.0;", "Error while evaluating expression");
        expect_error("bool b = 1 && true;", "`int` is not a type of `bool`");
        expect_error("bool b = true || \"s\";", "`str` is not a type of `bool`");
        expect_error("int x = 1 ? 1 : 2;", "`int` is not a type of `bool`");
        expect_error("bool f = true; int x = f ? 1 : \"s\";", "Error while evaluating expression");
    }

    #[test]
    fn test_postfix_requires_int() {
        expect_ok("int i = 0; i++; i--;");
        expect_error("double d = 1.0; d++;", "Error while evaluating expression");
    }

    #[test]
    fn test_conditions_must_be_bool() {
        let err = expect_error("int x = 1; if (x) { pass; }", "`int` is not a type of `bool`");
        assert_eq!(err.col, Some(16));
        expect_error("while (1) { pass; }", "`int` is not a type of `bool`");
        expect_error("do { pass; } while (\"s\");", "`str` is not a type of `bool`");
        expect_error("if (true) { pass; } elif (2.0) { pass; }", "`double` is not a type of `bool`");
    }

    #[test]
    fn test_block_declarations_do_not_escape() {
        let symbols = expect_ok("if (true) { int inner = 1; } else { int other = 2; } int inner = 3;");
        assert_eq!(symbols.len(), 1);
        expect_error("while (false) { int t = 1; } t = 2;", "Undefined variable: `t`");
    }

    #[test]
    fn test_break_and_continue_need_a_loop() {
        expect_error("break;", "Error while evaluating statement");
        expect_error("if (true) { continue; }", "Error while evaluating statement");
        expect_ok("while (true) { if (true) { break; } else { continue; } }");
        expect_ok("for (int i = 0; i < 2; i++) { continue; }");
        expect_error(
            "int x = 1; while (true) { switch (x) { case 1: break; } }",
            "Error while evaluating statement",
        );
    }

    #[test]
    fn test_switch_labels_match_scrutinee() {
        expect_ok("int x = 2; switch (x) { case 1: print(1); default: print(0); case 2: print(2); }");
        expect_error("int x = 2; switch (x) { case \"a\": pass; }", "`str` is not a type of `int`");
        expect_error(
            "int x = 2; switch (x) { default: int y = 1; } y = 2;",
            "Undefined variable: `y`",
        );
        expect_error("int x = 2; switch (x) { default: y = 1; }", "Undefined variable: `y`");
    }

    #[test]
    fn test_for_loop_scoping() {
        let symbols = expect_ok("for (int i = 0; i < 3; i++) { print(i); } int i = 5;");
        assert_eq!(symbols.get("i"), Some(&Type::Int));
        expect_ok("int n = 3; for (int i = 0; i < n; i++) { n = n - 1; }");
        expect_error("int i = 0; for (int i = 0; i < 3; i++) { pass; }", "Variable `i` is already defined");
        expect_error("for (double d = 0.0; d < 3.0; d++) { pass; }", "Error while evaluating statement");
        expect_error("int n = 1; for (int i = n; i < 3; i++) { pass; }", "variable `n` is not defined");
        expect_error("for (int i = 0; i + 1; i++) { pass; }", "`int` is not a type of `bool`");
    }

    #[test]
    fn test_inherited_symbols_are_copied() {
        let tokens = Lexer::new("x = 4; int y = x;", "test.mt").tokenize().expect("Lexing should succeed");
        let program = Parser::new(tokens).parse_program().expect("Parsing should succeed");
        let mut inherited = SymbolTable::new();
        inherited.insert("x".to_string(), Type::Int);
        let out = check(&program.statements, &inherited).expect("Check should succeed");
        assert_eq!(out.len(), 2);
        assert_eq!(inherited.len(), 1);
    }
}
