//! Reads the declaration text form back into a [`TestCase`].
use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::example::{Example, ExampleSide, TestCase};
use crate::graph::{Input, Internal, Model, Operand, OperandType, OperationType, Output, Parameter};
use crate::tensor::TensorValue;

use super::lexer::{tokenize, Token, TokenKind};

/// One `operand: values` entry of a value dict.
#[derive(Debug, Clone)]
struct DictEntry {
    operand: String,
    dims: Option<Vec<usize>>,
    literals: Vec<String>,
}

pub struct DeclarationParser {
    tokens: Vec<Token>,
    pos: usize,
    operands: HashMap<String, Operand>,
    models: HashMap<String, Model>,
    current_model: Option<String>,
    dicts: HashMap<String, Vec<DictEntry>>,
    examples: Vec<(String, String)>,
    ignored: Vec<usize>,
}

impl DeclarationParser {
    /// Parse a declaration into a test case called `name`.
    pub fn parse(name: &str, source: &str) -> Result<TestCase> {
        let mut parser = DeclarationParser {
            tokens: tokenize(source)?,
            pos: 0,
            operands: HashMap::new(),
            models: HashMap::new(),
            current_model: None,
            dicts: HashMap::new(),
            examples: Vec::new(),
            ignored: Vec::new(),
        };
        while parser.pos < parser.tokens.len() {
            parser.statement()?;
        }
        parser.finish(name)
    }

    fn finish(mut self, name: &str) -> Result<TestCase> {
        let model_name = self
            .current_model
            .take()
            .ok_or_else(|| anyhow!("declaration never creates a Model()"))?;
        let model = self
            .models
            .remove(&model_name)
            .ok_or_else(|| anyhow!("missing model {}", model_name))?;
        let mut case = TestCase::new(name, model);
        for (input_var, output_var) in &self.examples {
            let inputs = self.resolve_dict(case.model(), input_var)?;
            let outputs = self.resolve_dict(case.model(), output_var)?;
            case.push_example(Example { inputs, outputs });
        }
        for index in &self.ignored {
            case.ignore(*index);
        }
        Ok(case)
    }

    fn resolve_dict(&self, model: &Model, var: &str) -> Result<ExampleSide> {
        let entries = self
            .dicts
            .get(var)
            .ok_or_else(|| anyhow!("unknown value dict {}", var))?;
        let mut side = ExampleSide::new();
        for entry in entries {
            let index = model
                .index_of(&entry.operand)
                .ok_or_else(|| anyhow!("{} references operand {} outside the model", var, entry.operand))?;
            let operand = model.operand(index)?;
            let shape = entry.dims.clone().unwrap_or_else(|| operand.ty.shape());
            let literals: Vec<&str> = entry.literals.iter().map(String::as_str).collect();
            let value = TensorValue::parse_literals(operand.code().dtype(), &literals, shape)
                .map_err(|err| anyhow!("{}: operand {}: {}", var, entry.operand, err))?;
            side.insert(index, value);
        }
        Ok(side)
    }

    fn statement(&mut self) -> Result<()> {
        let head = self.ident()?;
        match head.as_str() {
            "Example" => {
                self.punct('(')?;
                self.punct('(')?;
                let inputs = self.ident()?;
                self.punct(',')?;
                let outputs = self.ident()?;
                self.punct(')')?;
                self.punct(')')?;
                self.examples.push((inputs, outputs));
                Ok(())
            }
            "IgnoreExample" => {
                self.punct('(')?;
                let index = self.number()?;
                self.punct(')')?;
                let index = index
                    .parse::<usize>()
                    .map_err(|err| anyhow!("invalid example index '{}': {}", index, err))?;
                self.ignored.push(index);
                Ok(())
            }
            _ => {
                self.punct('=')?;
                self.assignment(head)
            }
        }
    }

    fn assignment(&mut self, target: String) -> Result<()> {
        if self.peek_punct('{') {
            let entries = self.dict()?;
            self.dicts.insert(target, entries);
            return Ok(());
        }
        let callee = self.ident()?;
        match callee.as_str() {
            "Model" => {
                self.punct('(')?;
                self.punct(')')?;
                self.models.insert(target.clone(), Model::new());
                self.current_model = Some(target);
            }
            "Input" | "Output" | "Internal" | "Parameter" => {
                let operand = self.operand_decl(&callee)?;
                self.operands.insert(target, operand);
            }
            _ => {
                let model = self
                    .models
                    .get(&callee)
                    .cloned()
                    .ok_or_else(|| self.error(&format!("unknown name {}", callee)))?;
                self.punct('.')?;
                let method = self.ident()?;
                let model = match method.as_str() {
                    "Operation" => self.operation(model)?,
                    "RelaxedExecution" => {
                        self.punct('(')?;
                        let flag = self.ident()?;
                        self.punct(')')?;
                        let relaxed = match flag.as_str() {
                            "True" | "true" => true,
                            "False" | "false" => false,
                            other => return Err(self.error(&format!("expected True or False, got {}", other))),
                        };
                        model.relaxed_execution(relaxed)
                    }
                    other => return Err(self.error(&format!("unknown model method {}", other))),
                };
                self.models.insert(target.clone(), model);
                self.current_model = Some(target);
            }
        }
        Ok(())
    }

    fn operand_decl(&mut self, role: &str) -> Result<Operand> {
        self.punct('(')?;
        let name = self.string()?;
        self.punct(',')?;
        let code = self.string()?;
        self.punct(',')?;
        let shape = self.string()?;
        let operand = if role == "Parameter" {
            self.punct(',')?;
            let literals = self.list()?;
            let ty = OperandType::parse(&code, &shape)?;
            let literals: Vec<&str> = literals.iter().map(String::as_str).collect();
            let value = TensorValue::parse_literals(ty.code.dtype(), &literals, ty.shape())?;
            Parameter::from_value(&name, &code, &shape, &value)?
        } else {
            match role {
                "Input" => Input::new(&name, &code, &shape)?,
                "Output" => Output::new(&name, &code, &shape)?,
                _ => Internal::new(&name, &code, &shape)?,
            }
        };
        self.punct(')')?;
        Ok(operand)
    }

    fn operation(&mut self, model: Model) -> Result<Model> {
        self.punct('(')?;
        let op: OperationType = self.string()?.parse()?;
        let mut inputs = Vec::new();
        while self.peek_punct(',') {
            self.punct(',')?;
            inputs.push(self.operand_ref()?);
        }
        self.punct(')')?;
        self.punct('.')?;
        let to = self.ident()?;
        if to != "To" {
            return Err(self.error(&format!("expected To, got {}", to)));
        }
        self.punct('(')?;
        let mut outputs = vec![self.operand_ref()?];
        while self.peek_punct(',') {
            self.punct(',')?;
            outputs.push(self.operand_ref()?);
        }
        self.punct(')')?;
        let inputs: Vec<&Operand> = inputs.iter().collect();
        let outputs: Vec<&Operand> = outputs.iter().collect();
        Ok(model.operation(op, &inputs).to(&outputs))
    }

    fn operand_ref(&mut self) -> Result<Operand> {
        let var = self.ident()?;
        self.operands
            .get(&var)
            .cloned()
            .ok_or_else(|| self.error(&format!("unknown operand {}", var)))
    }

    fn dict(&mut self) -> Result<Vec<DictEntry>> {
        self.punct('{')?;
        let mut entries = Vec::new();
        while !self.peek_punct('}') {
            let var = self.ident()?;
            let operand = self
                .operands
                .get(&var)
                .map(|operand| operand.name.clone())
                .ok_or_else(|| self.error(&format!("unknown operand {}", var)))?;
            self.punct(':')?;
            let (dims, literals) = if self.peek_punct('(') {
                self.punct('(')?;
                let dims = self.string()?;
                self.punct(',')?;
                let literals = self.list()?;
                self.punct(')')?;
                (Some(parse_dims(&dims)?), literals)
            } else {
                (None, self.list()?)
            };
            entries.push(DictEntry {
                operand,
                dims,
                literals,
            });
            if !self.peek_punct('}') {
                self.punct(',')?;
            }
        }
        self.punct('}')?;
        Ok(entries)
    }

    fn list(&mut self) -> Result<Vec<String>> {
        self.punct('[')?;
        let mut items = Vec::new();
        while !self.peek_punct(']') {
            let token = self.next()?;
            match token.kind {
                TokenKind::Num(text) | TokenKind::Ident(text) => items.push(text),
                other => {
                    return Err(anyhow!(
                        "line {}: expected a literal, got {:?}",
                        token.line,
                        other
                    ))
                }
            }
            if !self.peek_punct(']') {
                self.punct(',')?;
            }
        }
        self.punct(']')?;
        Ok(items)
    }

    fn next(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| anyhow!("unexpected end of declaration"))?;
        self.pos += 1;
        Ok(token)
    }

    fn peek_punct(&self, c: char) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token { kind: TokenKind::Punct(p), .. }) if *p == c)
    }

    fn punct(&mut self, c: char) -> Result<()> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Punct(p) if p == c => Ok(()),
            other => Err(anyhow!(
                "line {}: expected '{}', got {:?}",
                token.line,
                c,
                other
            )),
        }
    }

    fn ident(&mut self) -> Result<String> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            other => Err(anyhow!(
                "line {}: expected identifier, got {:?}",
                token.line,
                other
            )),
        }
    }

    fn string(&mut self) -> Result<String> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Str(text) => Ok(text),
            other => Err(anyhow!(
                "line {}: expected string, got {:?}",
                token.line,
                other
            )),
        }
    }

    fn number(&mut self) -> Result<String> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Num(text) => Ok(text),
            other => Err(anyhow!(
                "line {}: expected number, got {:?}",
                token.line,
                other
            )),
        }
    }

    fn error(&self, message: &str) -> anyhow::Error {
        let line = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map(|token| token.line)
            .unwrap_or(0);
        anyhow!("line {}: {}", line, message)
    }
}

fn parse_dims(text: &str) -> Result<Vec<usize>> {
    let inner = text
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| anyhow!("malformed dims literal '{}'", text))?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<usize>()
                .map_err(|err| anyhow!("invalid dimension '{}': {}", item, err))
        })
        .collect()
}
