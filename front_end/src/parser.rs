//! Recursive-descent parser for MPPL.
//!
//! Each non-terminal of the grammar is one method on `Parser`. The parser
//! looks at exactly one token ahead, builds the syntax tree in `crate::ast`,
//! and stops at the first token that does not fit the grammar.

use crate::ast::*;
use crate::error::{FrontEndError, ParseError, ParseResult, ZeroArraySizeSnafu};
use crate::lexer::tokenize;
use crate::token::{Token, TokenType};
use crate::types::StdType;

pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Parser<'t> {
    /// `tokens` must end with an end-of-input token, as produced by the lexer.
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, position: 0 }
    }

    /// `program → 'program' name ';' block '.'`
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        self.expect(TokenType::Program, "'program'")?;
        let name = self.expect_name("program name")?;
        self.expect(TokenType::Semicolon, "';' after the program name")?;
        let block = self.parse_block()?;
        self.expect(TokenType::Dot, "'.' at the end of the program")?;
        Ok(Program { name, block })
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let mut declarations = Vec::new();
        loop {
            if self.check(TokenType::Var) {
                declarations.push(Declaration::Variables(self.parse_variable_declaration()?));
            } else if self.check(TokenType::Procedure) {
                declarations.push(Declaration::Procedure(self.parse_procedure()?));
            } else {
                break;
            }
        }
        let body = self.parse_compound_statement()?;
        Ok(Block { declarations, body })
    }

    /// `varDecl → 'var' names ':' type ';' { names ':' type ';' }`
    fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let line = self.expect(TokenType::Var, "'var'")?.line;
        let mut groups = Vec::new();
        loop {
            let names = self.parse_names()?;
            self.expect(TokenType::Colon, "':'")?;
            let typ = self.parse_type()?;
            self.expect(TokenType::Semicolon, "';'")?;
            groups.push(VariableGroup { names, typ });
            if !self.check(TokenType::Name) {
                break;
            }
        }
        Ok(VariableDeclaration { line, groups })
    }

    fn parse_names(&mut self) -> ParseResult<Vec<Ident>> {
        let mut names = vec![self.expect_name("variable name")?];
        while self.eat(TokenType::Comma) {
            names.push(self.expect_name("variable name")?);
        }
        Ok(names)
    }

    /// `type → stdType | 'array' '[' number ']' 'of' stdType`
    fn parse_type(&mut self) -> ParseResult<TypeSpec> {
        if self.check(TokenType::Array) {
            self.advance();
            self.expect(TokenType::LeftBracket, "'['")?;
            let size_token = self.expect(TokenType::Number, "array size")?;
            let (size, line) = (size_token.number, size_token.line);
            if size == 0 {
                return ZeroArraySizeSnafu { line }.fail();
            }
            self.expect(TokenType::RightBracket, "']'")?;
            self.expect(TokenType::Of, "'of'")?;
            let element = self.parse_standard_type()?;
            Ok(TypeSpec::Array { size, element, line })
        } else {
            Ok(TypeSpec::Standard(self.parse_standard_type()?))
        }
    }

    fn parse_standard_type(&mut self) -> ParseResult<StdType> {
        let typ = match self.peek().token_type {
            Some(TokenType::Integer) => StdType::Integer,
            Some(TokenType::Boolean) => StdType::Boolean,
            Some(TokenType::Char) => StdType::Char,
            _ => return Err(self.unexpected("type")),
        };
        self.advance();
        Ok(typ)
    }

    /// `subprogram → 'procedure' name [ formalParams ] ';' [ varDecl ] compoundStatement ';'`
    fn parse_procedure(&mut self) -> ParseResult<ProcedureDeclaration> {
        self.expect(TokenType::Procedure, "'procedure'")?;
        let name = self.expect_name("procedure name")?;
        let params = if self.check(TokenType::LeftParen) {
            self.parse_formal_parameters()?
        } else {
            Vec::new()
        };
        self.expect(TokenType::Semicolon, "';'")?;
        let variables = if self.check(TokenType::Var) {
            Some(self.parse_variable_declaration()?)
        } else {
            None
        };
        let body = self.parse_compound_statement()?;
        self.expect(TokenType::Semicolon, "';' after the procedure body")?;
        Ok(ProcedureDeclaration {
            name,
            params,
            variables,
            body,
        })
    }

    fn parse_formal_parameters(&mut self) -> ParseResult<Vec<ParameterGroup>> {
        self.expect(TokenType::LeftParen, "'('")?;
        let mut groups = Vec::new();
        loop {
            let names = self.parse_names()?;
            self.expect(TokenType::Colon, "':'")?;
            let typ = self.parse_standard_type()?;
            groups.push(ParameterGroup { names, typ });
            if !self.eat(TokenType::Semicolon) {
                break;
            }
        }
        self.expect(TokenType::RightParen, "')'")?;
        Ok(groups)
    }

    fn parse_compound_statement(&mut self) -> ParseResult<CompoundStatement> {
        let line = self.expect(TokenType::Begin, "'begin'")?.line;
        let mut statements = vec![self.parse_statement()?];
        while self.eat(TokenType::Semicolon) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenType::End, "'end'")?;
        Ok(CompoundStatement { line, statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.peek();
        let line = token.line;
        match token.token_type {
            Some(TokenType::Name) => self.parse_assignment(),
            Some(TokenType::If) => self.parse_condition(),
            Some(TokenType::While) => self.parse_iteration(),
            Some(TokenType::Break) => {
                self.advance();
                Ok(Statement::Break { line })
            }
            Some(TokenType::Call) => self.parse_call(),
            Some(TokenType::Return) => {
                self.advance();
                Ok(Statement::Return { line })
            }
            Some(TokenType::Read | TokenType::Readln) => self.parse_input(),
            Some(TokenType::Write | TokenType::Writeln) => self.parse_output(),
            Some(TokenType::Begin) => Ok(Statement::Compound(self.parse_compound_statement()?)),
            _ => Ok(Statement::Empty),
        }
    }

    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let target = self.parse_variable()?;
        let line = self.expect(TokenType::Assign, "':='")?.line;
        let value = self.parse_expression()?;
        Ok(Statement::Assignment { target, value, line })
    }

    fn parse_condition(&mut self) -> ParseResult<Statement> {
        let line = self.expect(TokenType::If, "'if'")?.line;
        let condition = self.parse_expression()?;
        self.expect(TokenType::Then, "'then'")?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat(TokenType::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            line,
        })
    }

    fn parse_iteration(&mut self) -> ParseResult<Statement> {
        let line = self.expect(TokenType::While, "'while'")?.line;
        let condition = self.parse_expression()?;
        self.expect(TokenType::Do, "'do'")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While { condition, body, line })
    }

    fn parse_call(&mut self) -> ParseResult<Statement> {
        self.expect(TokenType::Call, "'call'")?;
        let name = self.expect_name("procedure name")?;
        let mut arguments = Vec::new();
        if self.eat(TokenType::LeftParen) {
            arguments.push(self.parse_expression()?);
            while self.eat(TokenType::Comma) {
                arguments.push(self.parse_expression()?);
            }
            self.expect(TokenType::RightParen, "')'")?;
        }
        Ok(Statement::Call { name, arguments })
    }

    fn parse_input(&mut self) -> ParseResult<Statement> {
        let token = self.advance();
        let (newline, line) = (token.is(TokenType::Readln), token.line);
        let mut targets = Vec::new();
        if self.eat(TokenType::LeftParen) {
            targets.push(self.parse_variable()?);
            while self.eat(TokenType::Comma) {
                targets.push(self.parse_variable()?);
            }
            self.expect(TokenType::RightParen, "')'")?;
        }
        Ok(Statement::Read {
            newline,
            targets,
            line,
        })
    }

    fn parse_output(&mut self) -> ParseResult<Statement> {
        let token = self.advance();
        let (newline, line) = (token.is(TokenType::Writeln), token.line);
        let mut items = Vec::new();
        if self.eat(TokenType::LeftParen) {
            items.push(self.parse_output_format()?);
            while self.eat(TokenType::Comma) {
                items.push(self.parse_output_format()?);
            }
            self.expect(TokenType::RightParen, "')'")?;
        }
        Ok(Statement::Write {
            newline,
            items,
            line,
        })
    }

    /// `outputFormat → expression [ ':' number ] | string`
    fn parse_output_format(&mut self) -> ParseResult<OutputItem> {
        let token = self.peek();
        if token.is(TokenType::String) && token.length != 1 {
            let item = OutputItem::Text {
                value: token.lexeme.clone(),
                line: token.line,
            };
            self.advance();
            return Ok(item);
        }
        let expr = self.parse_expression()?;
        let width = if self.eat(TokenType::Colon) {
            Some(self.expect(TokenType::Number, "field width")?.number)
        } else {
            None
        };
        Ok(OutputItem::Value { expr, width })
    }

    fn parse_variable(&mut self) -> ParseResult<Variable> {
        let name = self.expect_name("variable name")?;
        let index = if self.eat(TokenType::LeftBracket) {
            let index = self.parse_expression()?;
            self.expect(TokenType::RightBracket, "']'")?;
            Some(Box::new(index))
        } else {
            None
        };
        Ok(Variable { name, index })
    }

    /// `expression → simpleExpr { relOp simpleExpr }`
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_simple_expression()?;
        while let Some(operator) = self.relational_operator() {
            let line = self.advance().line;
            let right = self.parse_simple_expression()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                line,
            };
        }
        Ok(left)
    }

    /// `simpleExpr → [sign] term { addOp term }`
    fn parse_simple_expression(&mut self) -> ParseResult<Expression> {
        let sign = match self.peek().token_type {
            Some(TokenType::Plus) => Some(UnaryOp::Plus),
            Some(TokenType::Minus) => Some(UnaryOp::Minus),
            _ => None,
        };
        let mut left = match sign {
            Some(operator) => {
                let line = self.advance().line;
                let operand = self.parse_term()?;
                Expression::Unary {
                    operator,
                    operand: Box::new(operand),
                    line,
                }
            }
            None => self.parse_term()?,
        };
        while let Some(operator) = self.additive_operator() {
            let line = self.advance().line;
            let right = self.parse_term()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                line,
            };
        }
        Ok(left)
    }

    /// `term → factor { mulOp factor }`
    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_factor()?;
        while let Some(operator) = self.multiplicative_operator() {
            let line = self.advance().line;
            let right = self.parse_factor()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                line,
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expression> {
        let token = self.peek();
        let line = token.line;
        match token.token_type {
            Some(TokenType::Name) => Ok(Expression::Variable(self.parse_variable()?)),
            Some(TokenType::Number) => {
                let value = self.advance().number;
                Ok(Expression::Number { value, line })
            }
            Some(TokenType::True) => {
                self.advance();
                Ok(Expression::Boolean { value: true, line })
            }
            Some(TokenType::False) => {
                self.advance();
                Ok(Expression::Boolean { value: false, line })
            }
            Some(TokenType::String) => {
                let value = self.advance().lexeme.clone();
                Ok(Expression::Str { value, line })
            }
            Some(TokenType::LeftParen) => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenType::RightParen, "')'")?;
                Ok(Expression::Paren(Box::new(inner)))
            }
            Some(TokenType::Not) => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expression::Not {
                    operand: Box::new(operand),
                    line,
                })
            }
            Some(ty) if ty.is_standard_type() => {
                let target = self.parse_standard_type()?;
                self.expect(TokenType::LeftParen, "'('")?;
                let operand = self.parse_expression()?;
                self.expect(TokenType::RightParen, "')'")?;
                Ok(Expression::Cast {
                    target,
                    operand: Box::new(operand),
                    line,
                })
            }
            _ => Err(self.unexpected("factor")),
        }
    }

    fn relational_operator(&self) -> Option<BinaryOp> {
        match self.peek().token_type? {
            TokenType::Equal => Some(BinaryOp::Equal),
            TokenType::NotEqual => Some(BinaryOp::NotEqual),
            TokenType::Less => Some(BinaryOp::Less),
            TokenType::LessEqual => Some(BinaryOp::LessEqual),
            TokenType::Greater => Some(BinaryOp::Greater),
            TokenType::GreaterEqual => Some(BinaryOp::GreaterEqual),
            _ => None,
        }
    }

    fn additive_operator(&self) -> Option<BinaryOp> {
        match self.peek().token_type? {
            TokenType::Plus => Some(BinaryOp::Add),
            TokenType::Minus => Some(BinaryOp::Sub),
            TokenType::Or => Some(BinaryOp::Or),
            _ => None,
        }
    }

    fn multiplicative_operator(&self) -> Option<BinaryOp> {
        match self.peek().token_type? {
            TokenType::Star => Some(BinaryOp::Mul),
            TokenType::Div => Some(BinaryOp::Div),
            TokenType::And => Some(BinaryOp::And),
            _ => None,
        }
    }

    // Helper methods
    fn peek(&self) -> &'t Token {
        // the trailing end-of-input token is never consumed
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if !token.is_eof() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: TokenType) -> bool {
        self.peek().is(expected)
    }

    fn eat(&mut self, expected: TokenType) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenType, what: &str) -> ParseResult<&'t Token> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_name(&mut self, what: &str) -> ParseResult<Ident> {
        let token = self.expect(TokenType::Name, what)?;
        Ok(Ident {
            name: token.lexeme.clone(),
            line: token.line,
        })
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.describe(),
            line: token.line,
        }
    }
}

/// Lex and parse a complete program.
pub fn parse_source(source: &str) -> Result<Program, FrontEndError> {
    let tokens = tokenize(source)?;
    Ok(Parser::new(&tokens).parse_program()?)
}
