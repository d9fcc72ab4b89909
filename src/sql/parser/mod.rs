use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{ColumnDef, Condition, Operator, Statement};
use crate::sql::parser::lexer::{Keyword, Lexer, Token};

pub mod ast;
mod lexer;

/// Command parser - converts the token stream into a typed `Statement`
///
/// The leading keyword (pair) selects the command kind; anything else is the
/// unrecognized-command failure. Grammar mismatches inside a recognized kind
/// fail with the plain syntax error (the join grammar with its own join
/// error), always before any state is touched.
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
    /// The join grammar is selected by the literal text " JOIN " appearing
    /// anywhere in the raw command, checked before the plain select grammar
    has_join: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given command text
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input).peekable(),
            has_join: input.to_uppercase().contains(" JOIN "),
        }
    }

    /// Parses the input into a statement
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = self.parse_statement()?;
        // One trailing semicolon is tolerated, nothing else
        self.next_if_token(Token::Semicolon);
        if self.peek()?.is_some() {
            return Err(Error::Syntax);
        }
        Ok(stmt)
    }

    /// Selects the command kind from the first token
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek()? {
            Some(Token::Keyword(Keyword::Create)) => self.parse_create(),
            Some(Token::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(Token::Keyword(Keyword::Select)) => self.parse_select(),
            Some(Token::Keyword(Keyword::Update)) => self.parse_update(),
            Some(Token::Keyword(Keyword::Delete)) => self.parse_delete(),
            _ => Err(Error::Unrecognized),
        }
    }

    /// CREATE TABLE <name> ( <colDef> (, <colDef>)* )
    fn parse_create(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Create))?;
        // CREATE without TABLE is an unrecognized command, not a malformed one
        if self.next_if_token(Token::Keyword(Keyword::Table)).is_none() {
            return Err(Error::Unrecognized);
        }
        let name = self.next_ident()?;
        self.next_expect(Token::OpenParen)?;

        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column_def()?);
            match self.next()? {
                Token::CloseParen => break,
                Token::Comma => {}
                _ => return Err(Error::Syntax),
            }
        }
        Ok(Statement::CreateTable { name, columns })
    }

    /// <name> <type> [PK] [UNIQUE], flags accepted in either order
    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let mut column = ColumnDef {
            name: self.next_ident()?,
            datatype: self.next_ident()?,
            primary_key: false,
            unique: false,
        };
        while let Some(Token::Keyword(keyword)) = self.next_if_keyword() {
            match keyword {
                Keyword::Pk => column.primary_key = true,
                Keyword::Unique => column.unique = true,
                _ => return Err(Error::Syntax),
            }
        }
        Ok(column)
    }

    /// INSERT INTO <name> VALUES ( <literal> (, <literal>)* )
    fn parse_insert(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Insert))?;
        if self.next_if_token(Token::Keyword(Keyword::Into)).is_none() {
            return Err(Error::Unrecognized);
        }
        let table = self.next_ident()?;
        self.next_expect(Token::Keyword(Keyword::Values))?;
        self.next_expect(Token::OpenParen)?;

        let mut values = Vec::new();
        loop {
            values.push(self.next_literal(&[Token::Comma, Token::CloseParen])?);
            match self.next()? {
                Token::CloseParen => break,
                Token::Comma => {}
                _ => return Err(Error::Syntax),
            }
        }
        // An empty parenthesis list carries no literal at all; a trailing
        // comma legitimately yields an empty final literal
        if values.len() == 1 && values[0].is_empty() {
            return Err(Error::Syntax);
        }
        Ok(Statement::Insert { table, values })
    }

    /// SELECT <cols> FROM <name> [WHERE <cond>]
    fn parse_select(&mut self) -> Result<Statement> {
        if self.has_join {
            return self.parse_join();
        }
        self.next_expect(Token::Keyword(Keyword::Select))?;

        // The column spec is consumed and discarded: the engine always
        // returns full rows
        let mut saw_columns = false;
        loop {
            match self.peek()? {
                Some(Token::Keyword(Keyword::From)) => break,
                Some(_) => {
                    self.next()?;
                    saw_columns = true;
                }
                None => return Err(Error::Syntax),
            }
        }
        if !saw_columns {
            return Err(Error::Syntax);
        }
        self.next_expect(Token::Keyword(Keyword::From))?;
        let table = self.next_ident()?;
        let filter = self.parse_where_clause()?;
        Ok(Statement::Select { table, filter })
    }

    /// SELECT * FROM <t1> JOIN <t2> ON <t1>.<c1> = <t2>.<c2>
    ///
    /// Every mismatch is the distinct join error. The qualifiers in the ON
    /// clause are parsed but not validated against the table names.
    fn parse_join(&mut self) -> Result<Statement> {
        self.join_expect(Token::Keyword(Keyword::Select))?;
        self.join_expect(Token::Asterisk)?;
        self.join_expect(Token::Keyword(Keyword::From))?;
        let left = self.join_ident()?;
        self.join_expect(Token::Keyword(Keyword::Join))?;
        let right = self.join_ident()?;
        self.join_expect(Token::Keyword(Keyword::On))?;
        let (_, left_col) = self.join_column_ref()?;
        self.join_expect(Token::Equal)?;
        let (_, right_col) = self.join_column_ref()?;
        Ok(Statement::Join {
            left,
            right,
            left_col,
            right_col,
        })
    }

    /// UPDATE <name> SET <col>=<literal> WHERE <cond>
    fn parse_update(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Update))?;
        let table = self.next_ident()?;
        self.next_expect(Token::Keyword(Keyword::Set))?;
        let column = self.next_ident()?;
        self.next_expect(Token::Equal)?;
        // A second `=` in the clause is a mismatch, not part of the literal
        let value = self.next_literal(&[Token::Keyword(Keyword::Where), Token::Equal])?;
        if self.next_if_token(Token::Keyword(Keyword::Where)).is_none() {
            return Err(Error::Syntax);
        }
        let filter = self.parse_condition()?;
        Ok(Statement::Update {
            table,
            column,
            value,
            filter,
        })
    }

    /// DELETE FROM <name> WHERE <cond>
    fn parse_delete(&mut self) -> Result<Statement> {
        self.next_expect(Token::Keyword(Keyword::Delete))?;
        if self.next_if_token(Token::Keyword(Keyword::From)).is_none() {
            return Err(Error::Unrecognized);
        }
        let table = self.next_ident()?;
        if self.next_if_token(Token::Keyword(Keyword::Where)).is_none() {
            return Err(Error::Syntax);
        }
        let filter = self.parse_condition()?;
        Ok(Statement::Delete { table, filter })
    }

    /// Optional WHERE clause; when present it drains the rest of the input
    fn parse_where_clause(&mut self) -> Result<Option<Condition>> {
        if self.next_if_token(Token::Keyword(Keyword::Where)).is_none() {
            return Ok(None);
        }
        Ok(Some(self.parse_condition()?))
    }

    /// One binary comparison `<col> <op> <literal>`
    ///
    /// The operator is the first `=` among the remaining tokens, else the
    /// first `>`, else the first `<`. A clause containing both `=` and `>`
    /// therefore always splits at the `=`: `x>=5` yields column `x >`,
    /// operator `=`, literal `5`. No operator at all is a mismatch.
    fn parse_condition(&mut self) -> Result<Condition> {
        let mut tokens = Vec::new();
        while let Some(token) = self.peek()? {
            if token == Token::Semicolon {
                break;
            }
            tokens.push(self.next()?);
        }

        let split = [
            (Token::Equal, Operator::Equal),
            (Token::GreaterThan, Operator::GreaterThan),
            (Token::LessThan, Operator::LessThan),
        ]
        .into_iter()
        .find_map(|(token, operator)| {
            tokens
                .iter()
                .position(|t| *t == token)
                .map(|pos| (pos, operator))
        });
        let Some((pos, operator)) = split else {
            return Err(Error::Syntax);
        };

        Ok(Condition {
            column: join_tokens(&tokens[..pos]),
            operator,
            value: join_tokens(&tokens[pos + 1..]),
        })
    }

    /// Collects the tokens of one literal, stopping before any of `until`
    /// or the end of input; multi-token literals join with single spaces
    fn next_literal(&mut self, until: &[Token]) -> Result<String> {
        let mut parts = Vec::new();
        while let Some(token) = self.peek()? {
            if until.contains(&token) {
                break;
            }
            parts.push(self.next()?);
        }
        Ok(join_tokens(&parts))
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Result<Option<Token>> {
        self.lexer.peek().cloned().transpose()
    }

    /// Consumes and returns the next token
    fn next(&mut self) -> Result<Token> {
        self.lexer.next().unwrap_or(Err(Error::Syntax))
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token::Ident(ident) => Ok(ident),
            _ => Err(Error::Syntax),
        }
    }

    /// Expects a specific token, fails with the syntax error otherwise
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        if self.next()? != expect {
            return Err(Error::Syntax);
        }
        Ok(())
    }

    /// Consumes the next token if it satisfies the predicate
    fn next_if<F: Fn(&Token) -> bool>(&mut self, predicate: F) -> Option<Token> {
        self.peek().unwrap_or(None).filter(|t| predicate(t))?;
        self.next().ok()
    }

    /// Consumes the next token if it's a keyword
    fn next_if_keyword(&mut self) -> Option<Token> {
        self.next_if(|t| matches!(t, Token::Keyword(_)))
    }

    /// Consumes the next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        self.next_if(|t| t == &token)
    }

    // Join-grammar helpers: same primitives, join-flavored failure

    fn join_expect(&mut self, expect: Token) -> Result<()> {
        self.next_expect(expect).map_err(|_| Error::Join)
    }

    fn join_ident(&mut self) -> Result<String> {
        self.next_ident().map_err(|_| Error::Join)
    }

    /// <qualifier>.<column>
    fn join_column_ref(&mut self) -> Result<(String, String)> {
        let qualifier = self.join_ident()?;
        self.join_expect(Token::Dot)?;
        let column = self.join_ident()?;
        Ok((qualifier, column))
    }
}

/// Renders a token run as literal text; runs of more than one token join
/// with single spaces
fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
