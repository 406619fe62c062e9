//! Recursive-descent declaration parser.
//!
//! Builds a [`KtFile`] from Kotlin source. Only declaration structure is
//! parsed; function bodies, property initializers and class headers past the
//! type parameters are skipped by bracket matching. The parser never fails:
//! problems are recorded on the file and parsing resumes at the next token.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, ParseError};
use super::lexer::{Lexer, Token, TokenKind};
use crate::base::FileId;
use crate::syntax::{
    AnnotationEntry, ClassDecl, ClassKind, FunctionDecl, FunctionType, ImportDirective,
    ImportEntry, KtFile, TypeAliasDecl, TypeElement, TypeParameter, TypeProjection, TypeRef,
    TypeSegment, UserType, ValueParameter, Variance,
};

/// Soft keywords accepted in modifier position.
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "internal",
    "abstract",
    "open",
    "final",
    "sealed",
    "data",
    "enum",
    "annotation",
    "inner",
    "companion",
    "override",
    "lateinit",
    "const",
    "inline",
    "noinline",
    "crossinline",
    "suspend",
    "tailrec",
    "operator",
    "infix",
    "external",
    "expect",
    "actual",
    "vararg",
    "reified",
    "value",
];

/// Parse one Kotlin source file.
pub fn parse_file(
    file_id: FileId,
    path: impl Into<Arc<str>>,
    source: impl Into<Arc<str>>,
) -> KtFile {
    let source: Arc<str> = source.into();
    let mut file = KtFile::new(file_id, path.into(), Arc::clone(&source));
    let mut parser = Parser::new(&source);
    parser.parse_into(&mut file);
    file.errors = parser.errors;
    file
}

/// Parse source text held in memory, e.g. in tests.
pub fn parse_source(source: &str) -> KtFile {
    parse_file(FileId::new(0), "Source.kt", source)
}

enum Member {
    Class(ClassDecl),
    Function(FunctionDecl),
    TypeAlias(TypeAliasDecl),
    Other,
}

struct Parser<'a> {
    source: &'a str,
    /// Non-trivia tokens.
    tokens: Vec<Token<'a>>,
    /// Whether a line break separates token `i` from the one before it.
    newline_before: Vec<bool>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut newline_before = Vec::new();
        let mut saw_newline = false;
        let mut errors = Vec::new();

        for token in Lexer::new(source) {
            match token.kind {
                TokenKind::Newline => saw_newline = true,
                TokenKind::BlockComment | TokenKind::LineComment | TokenKind::Whitespace => {
                    if token.text.contains('\n') {
                        saw_newline = true;
                    }
                }
                TokenKind::Unknown => {
                    let code = match token.text.as_bytes().first() {
                        Some(b'"') => ErrorCode::E0102,
                        Some(b'/') => ErrorCode::E0103,
                        _ => ErrorCode::E0101,
                    };
                    errors.push(ParseError::from_code(code, token.range));
                    if token.text.contains('\n') {
                        saw_newline = true;
                    }
                }
                _ => {
                    tokens.push(token);
                    newline_before.push(saw_newline);
                    saw_newline = false;
                }
            }
        }

        Self {
            source,
            tokens,
            newline_before,
            pos: 0,
            errors,
        }
    }

    // ============================================================
    // Token cursor
    // ============================================================

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.nth(n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.nth_kind(0) == Some(kind)
    }

    fn at_ident(&self, text: &str) -> bool {
        self.nth(0)
            .is_some_and(|t| t.kind == TokenKind::Ident && t.text == text)
    }

    /// Identifier, or a keyword used as a name segment (`a.in.b`).
    fn at_name(&self) -> bool {
        self.nth_kind(0).is_some_and(is_name_kind)
    }

    fn newline_before_current(&self) -> bool {
        self.newline_before.get(self.pos).copied().unwrap_or(true)
    }

    /// True when the current token starts right where the previous one ended.
    fn adjacent_to_previous(&self) -> bool {
        match (self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)), self.nth(0)) {
            (Some(prev), Some(current)) => prev.range.end() == current.range.start(),
            _ => false,
        }
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn current_start(&self) -> TextSize {
        self.nth(0)
            .map(|t| t.range.start())
            .unwrap_or_else(|| TextSize::of(self.source))
    }

    fn previous_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.range.end())
            .unwrap_or_default()
    }

    fn current_range(&self) -> TextRange {
        self.nth(0)
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(TextSize::of(self.source)))
    }

    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.previous_end().max(start))
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(ParseError::new(code, message, range));
    }

    fn expect_name(&mut self) -> Option<Token<'a>> {
        if self.at_name() {
            self.bump()
        } else {
            self.error(ErrorCode::E0301, "expected a name");
            None
        }
    }

    // ============================================================
    // File
    // ============================================================

    fn parse_into(&mut self, file: &mut KtFile) {
        self.parse_file_annotations();

        if self.eat(TokenKind::PackageKw) {
            match self.parse_dotted_name() {
                Some((name, _)) => file.package = name,
                None => self.error(ErrorCode::E0502, "expected a package name"),
            }
            self.eat(TokenKind::Semicolon);
        }

        while self.at(TokenKind::ImportKw) {
            let start = self.current_start();
            self.bump();
            if let Some(directive) = self.parse_import_directive() {
                file.imports.push(ImportEntry {
                    directive,
                    range: self.range_from(start),
                });
            }
            self.eat(TokenKind::Semicolon);
        }

        while !self.at_end() {
            let before = self.pos;
            match self.parse_member(true) {
                Member::Class(class) => file.classes.push(class),
                Member::Function(function) => file.functions.push(function),
                Member::TypeAlias(alias) => file.type_aliases.push(alias),
                Member::Other => {}
            }
            if self.pos == before {
                self.bump();
            }
        }
    }

    /// `@file:JvmName("x")` annotations before the package header are dropped.
    fn parse_file_annotations(&mut self) {
        while self.at(TokenKind::At)
            && self.nth(1).is_some_and(|t| t.text == "file")
            && self.nth_kind(2) == Some(TokenKind::Colon)
        {
            self.parse_annotation();
        }
    }

    fn parse_dotted_name(&mut self) -> Option<(SmolStr, TextRange)> {
        let start = self.current_start();
        let mut segments: Vec<&str> = Vec::new();
        segments.push(self.expect_name()?.name());
        while self.at(TokenKind::Dot) && self.nth_kind(1).is_some_and(is_name_kind) {
            self.bump();
            if let Some(token) = self.bump() {
                segments.push(token.name());
            }
        }
        Some((SmolStr::new(segments.join(".")), self.range_from(start)))
    }

    fn parse_import_directive(&mut self) -> Option<ImportDirective> {
        let Some((path, _)) = self.parse_dotted_name() else {
            self.error(ErrorCode::E0501, "expected an import path");
            return None;
        };
        if self.at(TokenKind::Dot) && self.nth_kind(1) == Some(TokenKind::Star) {
            self.bump();
            self.bump();
            return Some(ImportDirective::star(path));
        }
        if self.eat(TokenKind::AsKw) {
            let alias = self.expect_name()?;
            return Some(ImportDirective::aliased(path, alias.name()));
        }
        Some(ImportDirective::single(path))
    }

    // ============================================================
    // Declarations
    // ============================================================

    fn parse_member(&mut self, top_level: bool) -> Member {
        let start = self.current_start();
        let before = self.pos;
        let (annotations, modifiers) = self.parse_annotations_and_modifiers();

        match self.nth_kind(0) {
            Some(TokenKind::ClassKw) => {
                self.bump();
                let kind = if modifiers.iter().any(|m| m == "enum") {
                    ClassKind::EnumClass
                } else if modifiers.iter().any(|m| m == "annotation") {
                    ClassKind::AnnotationClass
                } else {
                    ClassKind::Class
                };
                self.parse_class_rest(start, kind, annotations, modifiers)
            }
            Some(TokenKind::InterfaceKw) => {
                self.bump();
                self.parse_class_rest(start, ClassKind::Interface, annotations, modifiers)
            }
            Some(TokenKind::FunKw) if self.nth_kind(1) == Some(TokenKind::InterfaceKw) => {
                self.bump();
                self.bump();
                self.parse_class_rest(start, ClassKind::Interface, annotations, modifiers)
            }
            Some(TokenKind::ObjectKw) => {
                self.bump();
                let kind = if modifiers.iter().any(|m| m == "companion") {
                    ClassKind::CompanionObject
                } else {
                    ClassKind::Object
                };
                self.parse_class_rest(start, kind, annotations, modifiers)
            }
            Some(TokenKind::FunKw) => {
                self.bump();
                match self.parse_function_rest(start, annotations, modifiers) {
                    Some(function) => Member::Function(function),
                    None => Member::Other,
                }
            }
            Some(TokenKind::TypeAliasKw) => {
                self.bump();
                self.parse_type_alias_rest(start)
            }
            Some(TokenKind::ValKw | TokenKind::VarKw) => {
                self.bump();
                self.skip_expression();
                Member::Other
            }
            Some(TokenKind::Ident)
                if (self.at_ident("init") && self.nth_kind(1) == Some(TokenKind::LBrace))
                    || self.at_ident("constructor") =>
            {
                self.bump();
                self.skip_expression();
                Member::Other
            }
            Some(TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket) => {
                self.skip_balanced();
                Member::Other
            }
            Some(_) if self.pos == before => {
                if let Some(token) = self.bump() {
                    let harmless = matches!(
                        token.kind,
                        TokenKind::Semicolon | TokenKind::Comma | TokenKind::RBrace
                    );
                    if top_level && !harmless {
                        self.errors.push(ParseError::new(
                            ErrorCode::E0901,
                            format!("unexpected `{}` at top level", token.text),
                            token.range,
                        ));
                    }
                }
                Member::Other
            }
            _ => Member::Other,
        }
    }

    fn parse_annotations_and_modifiers(&mut self) -> (Vec<AnnotationEntry>, Vec<SmolStr>) {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        loop {
            if self.at(TokenKind::At) {
                if let Some(annotation) = self.parse_annotation() {
                    annotations.push(annotation);
                }
            } else if self.at_modifier() {
                if let Some(token) = self.bump() {
                    modifiers.push(SmolStr::new(token.text));
                }
            } else {
                break;
            }
        }
        (annotations, modifiers)
    }

    /// A soft keyword is a modifier only when a declaration continues after it.
    fn at_modifier(&self) -> bool {
        let Some(token) = self.nth(0) else {
            return false;
        };
        token.kind == TokenKind::Ident
            && MODIFIERS.contains(&token.text)
            && self.nth_kind(1).is_some_and(|next| {
                matches!(
                    next,
                    TokenKind::Ident
                        | TokenKind::At
                        | TokenKind::ClassKw
                        | TokenKind::InterfaceKw
                        | TokenKind::ObjectKw
                        | TokenKind::FunKw
                        | TokenKind::ValKw
                        | TokenKind::VarKw
                        | TokenKind::TypeAliasKw
                )
            })
    }

    /// `@Name`, `@a.b.Name(args)`, `@field:Name`. Multi-annotations `@[A B]` are skipped.
    fn parse_annotation(&mut self) -> Option<AnnotationEntry> {
        let start = self.current_start();
        self.bump(); // @

        let mut use_site = None;
        if self.at_name() && self.nth_kind(1) == Some(TokenKind::Colon) {
            use_site = self.bump().map(|t| SmolStr::new(t.name()));
            self.bump();
        }

        if self.at(TokenKind::LBracket) {
            self.skip_balanced();
            return None;
        }

        let mut segments: Vec<&str> = vec![self.expect_name()?.name()];
        while self.at(TokenKind::Dot)
            && self.adjacent_to_previous()
            && self.nth_kind(1).is_some_and(is_name_kind)
        {
            self.bump();
            if let Some(token) = self.bump() {
                segments.push(token.name());
            }
        }

        if self.at(TokenKind::Lt) && self.adjacent_to_previous() {
            self.skip_type_arguments();
        }

        let mut arguments = Vec::new();
        if self.at(TokenKind::LParen) && self.adjacent_to_previous() {
            arguments = self.parse_value_arguments();
        }

        Some(AnnotationEntry {
            use_site,
            name: SmolStr::new(segments.join(".")),
            arguments,
            range: self.range_from(start),
        })
    }

    /// Raw text of each comma-separated argument between parentheses.
    fn parse_value_arguments(&mut self) -> Vec<String> {
        let open = self.current_range();
        self.bump(); // (
        let mut arguments = Vec::new();
        let mut depth = 0usize;
        let mut arg_start: Option<TextSize> = None;
        let mut arg_end = TextSize::default();

        while let Some(token) = self.nth(0).copied() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace if depth > 0 => {
                    depth -= 1
                }
                TokenKind::RParen => {
                    self.bump();
                    if let Some(start) = arg_start {
                        arguments.push(self.source[TextRange::new(start, arg_end)].to_string());
                    }
                    return arguments;
                }
                TokenKind::Comma if depth == 0 => {
                    self.bump();
                    if let Some(start) = arg_start.take() {
                        arguments.push(self.source[TextRange::new(start, arg_end)].to_string());
                    }
                    continue;
                }
                _ => {}
            }
            arg_start.get_or_insert(token.range.start());
            arg_end = token.range.end();
            self.bump();
        }

        self.errors
            .push(ParseError::from_code(ErrorCode::E0203, open));
        arguments
    }

    fn parse_class_rest(
        &mut self,
        start: TextSize,
        kind: ClassKind,
        annotations: Vec<AnnotationEntry>,
        modifiers: Vec<SmolStr>,
    ) -> Member {
        let keyword_range = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.range)
            .unwrap_or_default();

        let name_token = if self.at_name() { self.bump() } else { None };
        let (name, name_range) = if let Some(token) = name_token {
            (SmolStr::new(token.name()), token.range)
        } else if kind == ClassKind::CompanionObject {
            (SmolStr::new_static("Companion"), keyword_range)
        } else {
            self.error(ErrorCode::E0301, "expected a class name");
            (SmolStr::default(), keyword_range)
        };

        let type_parameters = if self.at(TokenKind::Lt) {
            self.parse_type_parameters()
        } else {
            Vec::new()
        };

        let mut classes = Vec::new();
        let mut functions = Vec::new();

        // Header: primary constructor, supertypes, where-clause.
        loop {
            match self.nth_kind(0) {
                None | Some(TokenKind::RBrace) => break,
                Some(TokenKind::LBrace) => {
                    self.parse_class_body(&mut classes, &mut functions);
                    break;
                }
                Some(TokenKind::LParen | TokenKind::LBracket) => self.skip_balanced(),
                Some(_) if self.newline_before_current() && self.looks_like_declaration_start() => {
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        Member::Class(ClassDecl {
            name,
            kind,
            modifiers,
            annotations,
            type_parameters,
            classes,
            functions,
            range: self.range_from(start),
            name_range,
        })
    }

    fn parse_class_body(&mut self, classes: &mut Vec<ClassDecl>, functions: &mut Vec<FunctionDecl>) {
        let open = self.current_range();
        self.bump(); // {
        loop {
            if self.at_end() {
                self.errors.push(ParseError::from_code(ErrorCode::E0202, open));
                return;
            }
            if self.eat(TokenKind::RBrace) {
                return;
            }
            let before = self.pos;
            match self.parse_member(false) {
                Member::Class(class) => classes.push(class),
                Member::Function(function) => functions.push(function),
                Member::TypeAlias(_) | Member::Other => {}
            }
            if self.pos == before {
                self.bump();
            }
        }
    }

    fn parse_function_rest(
        &mut self,
        start: TextSize,
        annotations: Vec<AnnotationEntry>,
        modifiers: Vec<SmolStr>,
    ) -> Option<FunctionDecl> {
        let mut type_parameters = if self.at(TokenKind::Lt) {
            self.parse_type_parameters()
        } else {
            Vec::new()
        };

        let mut receiver = None;
        let (name, name_range) = if self.at_name() && self.nth_kind(1) == Some(TokenKind::LParen) {
            let token = self.bump()?;
            (SmolStr::new(token.name()), token.range)
        } else {
            // Extension function: the receiver type is followed by `.name`.
            let type_ref = self.parse_type_ref()?;
            let (receiver_type, name_token) = self.split_receiver(type_ref)?;
            receiver = Some(receiver_type);
            name_token
        };

        if self.at(TokenKind::Lt) {
            type_parameters.extend(self.parse_type_parameters());
        }

        let parameters = if self.at(TokenKind::LParen) {
            self.parse_value_parameters()
        } else {
            self.error(ErrorCode::E0902, "expected `(`");
            Vec::new()
        };

        let return_type = if self.eat(TokenKind::Colon) {
            let type_ref = self.parse_type_ref();
            if type_ref.is_none() {
                self.error(ErrorCode::E0305, "expected a return type");
            }
            type_ref
        } else {
            None
        };

        // where-clause and body
        if self.at_ident("where") {
            while !self.at_end()
                && !self.at(TokenKind::LBrace)
                && !self.at(TokenKind::Eq)
                && !(self.newline_before_current() && self.looks_like_declaration_start())
                && !self.at(TokenKind::RBrace)
            {
                self.bump();
            }
        }
        if self.at(TokenKind::LBrace) {
            self.skip_balanced();
        } else if self.eat(TokenKind::Eq) {
            self.skip_expression();
        }

        Some(FunctionDecl {
            name,
            modifiers,
            annotations,
            type_parameters,
            receiver,
            parameters,
            return_type,
            range: self.range_from(start),
            name_range,
        })
    }

    /// Separates `Receiver.name` parsed as one type into receiver and name.
    fn split_receiver(&mut self, mut type_ref: TypeRef) -> Option<(TypeRef, (SmolStr, TextRange))> {
        if self.at(TokenKind::Dot) && self.nth_kind(1).is_some_and(is_name_kind) {
            self.bump();
            let token = self.bump()?;
            return Some((type_ref, (SmolStr::new(token.name()), token.range)));
        }

        let TypeElement::User(user) = &mut type_ref.element else {
            self.error(ErrorCode::E0301, "expected a function name");
            return None;
        };
        if user.segments.len() < 2 || !user.segments.last()?.arguments.is_empty() {
            self.error(ErrorCode::E0301, "expected a function name");
            return None;
        }
        let name_segment = user.segments.pop()?;
        let receiver_end = user.segments.last()?.range.end();
        let element_start = type_ref.range.end() - TextSize::of(type_ref.text.as_str());
        type_ref.range = TextRange::new(type_ref.range.start(), receiver_end);
        type_ref.text = self.source[TextRange::new(element_start, receiver_end)].to_string();
        Some((type_ref, (name_segment.name, name_segment.range)))
    }

    fn parse_value_parameters(&mut self) -> Vec<ValueParameter> {
        let open = self.current_range();
        self.bump(); // (
        let mut parameters = Vec::new();
        loop {
            if self.at_end() {
                self.errors.push(ParseError::from_code(ErrorCode::E0203, open));
                break;
            }
            if self.eat(TokenKind::RParen) {
                break;
            }
            if self.eat(TokenKind::Comma) {
                continue;
            }

            let start = self.current_start();
            let (annotations, _) = self.parse_annotations_and_modifiers();
            if self.at(TokenKind::ValKw) || self.at(TokenKind::VarKw) {
                self.bump();
            }
            let Some(name) = self.expect_name() else {
                self.skip_until_argument_end();
                continue;
            };
            let type_ref = if self.eat(TokenKind::Colon) {
                self.parse_type_ref()
            } else {
                None
            };
            if self.eat(TokenKind::Eq) {
                self.skip_until_argument_end();
            }
            parameters.push(ValueParameter {
                name: SmolStr::new(name.name()),
                annotations,
                type_ref,
                range: self.range_from(start),
            });
            if !self.at(TokenKind::Comma) && !self.at(TokenKind::RParen) {
                self.skip_until_argument_end();
            }
        }
        parameters
    }

    fn parse_type_parameters(&mut self) -> Vec<TypeParameter> {
        self.bump(); // <
        let mut parameters = Vec::new();
        while !self.at_end() && !self.eat(TokenKind::Gt) {
            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.parse_annotations_and_modifiers();
            if self.at(TokenKind::InKw) || (self.at_ident("out") && self.nth_kind(1) == Some(TokenKind::Ident)) {
                self.bump();
            }
            let Some(name) = self.expect_name() else {
                self.bump();
                continue;
            };
            let bound = if self.eat(TokenKind::Colon) {
                self.parse_type_ref()
            } else {
                None
            };
            parameters.push(TypeParameter {
                name: SmolStr::new(name.name()),
                bound,
            });
        }
        parameters
    }

    fn parse_type_alias_rest(&mut self, start: TextSize) -> Member {
        let Some(name) = self.expect_name() else {
            return Member::Other;
        };
        if self.at(TokenKind::Lt) {
            self.parse_type_parameters();
        }
        let type_ref = if self.eat(TokenKind::Eq) {
            self.parse_type_ref()
        } else {
            self.error(ErrorCode::E0902, "expected `=`");
            None
        };
        Member::TypeAlias(TypeAliasDecl {
            name: SmolStr::new(name.name()),
            type_ref,
            range: self.range_from(start),
        })
    }

    // ============================================================
    // Types
    // ============================================================

    fn parse_type_ref(&mut self) -> Option<TypeRef> {
        let start = self.current_start();
        let mut annotations = Vec::new();
        while self.at(TokenKind::At) {
            if let Some(annotation) = self.parse_annotation() {
                annotations.push(annotation);
            }
        }

        let element_start = self.current_start();
        let Some(element) = self.parse_type_element() else {
            self.error(ErrorCode::E0305, "expected a type");
            return None;
        };
        let element_range = self.range_from(element_start);

        Some(TypeRef {
            annotations,
            element,
            text: self.source[element_range].to_string(),
            range: self.range_from(start),
        })
    }

    fn parse_type_element(&mut self) -> Option<TypeElement> {
        let is_suspend = self.at_ident("suspend")
            && matches!(self.nth_kind(1), Some(TokenKind::LParen | TokenKind::Ident));
        if is_suspend {
            self.bump();
        }

        let mut element = if self.at(TokenKind::LParen) {
            if self.parenthesis_starts_function_type() {
                self.parse_function_type(None, is_suspend)?
            } else {
                self.bump();
                let inner = self.parse_type_ref()?;
                if !self.eat(TokenKind::RParen) {
                    self.error(ErrorCode::E0902, "expected `)`");
                }
                inner.element
            }
        } else if self.at_name() {
            TypeElement::User(self.parse_user_type())
        } else {
            return None;
        };

        while self.at(TokenKind::Question) {
            self.bump();
            element = TypeElement::Nullable(Box::new(element));
        }

        // Receiver function type: `Receiver.(Args) -> Result`
        if self.at(TokenKind::Dot) && self.nth_kind(1) == Some(TokenKind::LParen) {
            let receiver_start = self.current_start();
            let receiver = TypeRef {
                annotations: Vec::new(),
                text: String::new(),
                range: TextRange::empty(receiver_start),
                element,
            };
            self.bump(); // .
            element = self.parse_function_type(Some(receiver), is_suspend)?;
            while self.at(TokenKind::Question) {
                self.bump();
                element = TypeElement::Nullable(Box::new(element));
            }
        }

        Some(element)
    }

    fn parse_user_type(&mut self) -> UserType {
        let mut segments = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                break;
            };
            let arguments = if self.at(TokenKind::Lt) {
                self.parse_type_arguments()
            } else {
                Vec::new()
            };
            segments.push(TypeSegment {
                name: SmolStr::new(token.name()),
                arguments,
                range: self.range_from(token.range.start()),
            });
            let continues = self.at(TokenKind::Dot)
                && self.nth_kind(1).is_some_and(is_name_kind)
                && self.nth_kind(2) != Some(TokenKind::LParen);
            if !continues {
                break;
            }
            self.bump(); // .
        }
        UserType { segments }
    }

    fn parse_type_arguments(&mut self) -> Vec<TypeProjection> {
        self.bump(); // <
        let mut arguments = Vec::new();
        loop {
            if self.at_end() {
                self.error(ErrorCode::E0203, "unclosed type argument list");
                break;
            }
            if self.eat(TokenKind::Gt) {
                break;
            }
            if self.eat(TokenKind::Comma) {
                continue;
            }
            if self.eat(TokenKind::Star) {
                arguments.push(TypeProjection::Star);
                continue;
            }
            let variance = if self.at(TokenKind::InKw) {
                self.bump();
                Some(Variance::In)
            } else if self.at_ident("out")
                && matches!(
                    self.nth_kind(1),
                    Some(TokenKind::Ident | TokenKind::LParen | TokenKind::At)
                )
            {
                self.bump();
                Some(Variance::Out)
            } else {
                None
            };
            match self.parse_type_ref() {
                Some(type_ref) => arguments.push(TypeProjection::Type { variance, type_ref }),
                None => {
                    self.bump();
                }
            }
        }
        arguments
    }

    /// Looks past the matching `)` for a `->`.
    fn parenthesis_starts_function_type(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.pos;
        while let Some(token) = self.tokens.get(i) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::Arrow);
                    }
                }
                TokenKind::LBrace | TokenKind::RBrace => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn parse_function_type(&mut self, receiver: Option<TypeRef>, is_suspend: bool) -> Option<TypeElement> {
        self.bump(); // (
        let mut parameters = Vec::new();
        loop {
            if self.at_end() {
                self.error(ErrorCode::E0203, "unclosed parameter list");
                return None;
            }
            if self.eat(TokenKind::RParen) {
                break;
            }
            if self.eat(TokenKind::Comma) {
                continue;
            }
            // Named parameter: `(name: Type) -> R`
            if self.at_name() && self.nth_kind(1) == Some(TokenKind::Colon) {
                self.bump();
                self.bump();
            }
            match self.parse_type_ref() {
                Some(type_ref) => parameters.push(type_ref),
                None => {
                    self.bump();
                }
            }
        }
        if !self.eat(TokenKind::Arrow) {
            self.error(ErrorCode::E0902, "expected `->`");
            return None;
        }
        let return_type = self.parse_type_ref()?;
        Some(TypeElement::Function(FunctionType {
            receiver: receiver.map(Box::new),
            parameters,
            return_type: Box::new(return_type),
            is_suspend,
        }))
    }

    // ============================================================
    // Skipping
    // ============================================================

    /// Skips a bracketed group starting at the current token.
    fn skip_balanced(&mut self) {
        let open = self.current_range();
        let mut depth = 0usize;
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
        let code = if self.source[open].starts_with('{') {
            ErrorCode::E0202
        } else {
            ErrorCode::E0203
        };
        self.errors.push(ParseError::from_code(code, open));
    }

    fn skip_type_arguments(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.nth(0).copied() {
            match token.kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semicolon => return,
                _ => {}
            }
            self.bump();
        }
    }

    /// Skips an initializer or expression body. Stops before the next
    /// declaration on a new line or before the closing brace of the body.
    fn skip_expression(&mut self) {
        let start = self.pos;
        while let Some(token) = self.nth(0).copied() {
            if self.pos > start
                && self.newline_before_current()
                && self.looks_like_declaration_start()
            {
                return;
            }
            match token.kind {
                TokenKind::RBrace | TokenKind::Semicolon => return,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced();
                    continue;
                }
                TokenKind::RParen | TokenKind::RBracket => {
                    self.errors
                        .push(ParseError::from_code(ErrorCode::E0205, token.range));
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skips a default value up to the `,` or `)` that ends the parameter.
    fn skip_until_argument_end(&mut self) {
        while let Some(token) = self.nth(0) {
            match token.kind {
                TokenKind::Comma | TokenKind::RParen => return,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.skip_balanced(),
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// True when the tokens ahead read as annotations/modifiers followed by a
    /// declaration keyword.
    fn looks_like_declaration_start(&self) -> bool {
        let mut i = self.pos;
        loop {
            let Some(token) = self.tokens.get(i) else {
                return false;
            };
            match token.kind {
                TokenKind::ClassKw
                | TokenKind::InterfaceKw
                | TokenKind::ObjectKw
                | TokenKind::FunKw
                | TokenKind::ValKw
                | TokenKind::VarKw
                | TokenKind::TypeAliasKw => return true,
                TokenKind::At => {
                    // @Name, @a.b.Name, @site:Name, optionally followed by (args)
                    i += 1;
                    if self.tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::Colon) {
                        i += 2;
                    }
                    i += 1;
                    while self.tokens.get(i).map(|t| t.kind) == Some(TokenKind::Dot) {
                        i += 2;
                    }
                    if self.tokens.get(i).map(|t| t.kind) == Some(TokenKind::LParen) {
                        let mut depth = 0usize;
                        while let Some(t) = self.tokens.get(i) {
                            match t.kind {
                                TokenKind::LParen => depth += 1,
                                TokenKind::RParen => {
                                    depth -= 1;
                                    if depth == 0 {
                                        i += 1;
                                        break;
                                    }
                                }
                                _ => {}
                            }
                            i += 1;
                        }
                    }
                }
                TokenKind::Ident if MODIFIERS.contains(&token.text) => i += 1,
                TokenKind::Ident if token.text == "init" => {
                    return self.tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::LBrace);
                }
                _ => return false,
            }
        }
    }
}

fn is_name_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::PackageKw
            | TokenKind::ImportKw
            | TokenKind::ClassKw
            | TokenKind::InterfaceKw
            | TokenKind::ObjectKw
            | TokenKind::FunKw
            | TokenKind::ValKw
            | TokenKind::VarKw
            | TokenKind::TypeAliasKw
            | TokenKind::AsKw
            | TokenKind::InKw
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn single_function(source: &str) -> FunctionDecl {
        let file = parse_source(source);
        assert!(file.errors.is_empty(), "{:?}", file.errors);
        file.functions.into_iter().next().expect("one function")
    }

    #[test]
    fn test_header() {
        let file = parse_source(
            "@file:JvmName(\"X\")\npackage com.example.app\n\nimport dagger.Module\nimport a.b.*\nimport a.c.Foo as Bar\n",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);
        assert_eq!(file.package, "com.example.app");
        let imports: Vec<_> = file.import_directives().cloned().collect();
        assert_eq!(
            imports,
            vec![
                ImportDirective::single("dagger.Module"),
                ImportDirective::star("a.b"),
                ImportDirective::aliased("a.c.Foo", "Bar"),
            ]
        );
    }

    #[test]
    fn test_backticked_names_are_unquoted() {
        let file = parse_source(
            "package com.`fun`.app\nimport com.`fun`.ui.MainActivity\nimport a.b.Foo as `in`\n@`Module` abstract class `My Bindings` {\n    abstract fun `provide main`(`object`: Foo): ui.`Main Activity`\n}\n",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);
        assert_eq!(file.package, "com.fun.app");
        let imports: Vec<_> = file.import_directives().cloned().collect();
        assert_eq!(
            imports,
            vec![
                ImportDirective::single("com.fun.ui.MainActivity"),
                ImportDirective::aliased("a.b.Foo", "in"),
            ]
        );

        let class = &file.classes[0];
        assert_eq!(class.name, "My Bindings");
        assert_eq!(class.annotations[0].name, "Module");
        let function = &class.functions[0];
        assert_eq!(function.name, "provide main");
        assert_eq!(function.parameters[0].name, "object");
        let Some(TypeElement::User(user)) = function.return_type.as_ref().map(|t| &t.element) else {
            panic!("user type expected");
        };
        assert_eq!(user.qualified_text(), "ui.Main Activity");
    }

    #[test]
    fn test_module_class_with_injector_function() {
        let file = parse_source(
            r#"package com.example

@Module(includes = [OtherModule::class])
abstract class ActivityModule {
    @ActivityScope
    @ContributesAndroidInjector(modules = [MainModule::class])
    abstract fun mainActivity(): MainActivity

    companion object {
        @Provides
        fun provideName(): String = "name"
    }
}
"#,
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);
        let class = &file.classes[0];
        assert_eq!(class.name, "ActivityModule");
        assert!(class.has_modifier("abstract"));
        assert_eq!(class.annotations[0].name, "Module");
        assert_eq!(class.annotations[0].arguments, vec!["includes = [OtherModule::class]"]);

        let function = &class.functions[0];
        assert_eq!(function.name, "mainActivity");
        let names: Vec<_> = function.annotations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["ActivityScope", "ContributesAndroidInjector"]);
        assert_eq!(
            function.annotations[1].arguments,
            vec!["modules = [MainModule::class]"]
        );
        assert_eq!(function.return_type.as_ref().map(|t| t.text.as_str()), Some("MainActivity"));

        assert_eq!(class.classes.len(), 1);
        assert_eq!(class.classes[0].kind, ClassKind::CompanionObject);
        assert_eq!(class.classes[0].name, "Companion");
        assert_eq!(class.functions(true).len(), 2);
    }

    #[test]
    fn test_nested_classes_and_chains() {
        let file = parse_source(
            "class Outer(val x: Int) : Base(), Iface {\n    interface Inner\n    object Deep {\n        class Deeper\n    }\n}\nclass Second\n",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);
        let chains = file.classes_and_inner_classes();
        let names: Vec<String> = chains.iter().map(|c| file.qualified_name(c)).collect();
        assert_eq!(
            names,
            vec!["Outer", "Outer.Inner", "Outer.Deep", "Outer.Deep.Deeper", "Second"]
        );
    }

    #[rstest]
    #[case("fun foo(): Set<String> = setOf()", "Set<String>", true, false)]
    #[case("fun foo(): () -> Unit = {}", "() -> Unit", false, true)]
    #[case("fun foo(): Map<String, in Foo>? = null", "Map<String, in Foo>?", true, false)]
    #[case("fun foo(): suspend (Int) -> Unit = {}", "suspend (Int) -> Unit", false, true)]
    #[case("fun foo(): a.b.Outer.Inner", "a.b.Outer.Inner", false, false)]
    fn test_return_types(
        #[case] source: &str,
        #[case] text: &str,
        #[case] generic: bool,
        #[case] function_type: bool,
    ) {
        let function = single_function(source);
        let return_type = function.return_type.expect("return type");
        assert_eq!(return_type.text, text);
        assert_eq!(return_type.is_generic_type(), generic);
        assert_eq!(return_type.is_function_type(), function_type);
    }

    #[test]
    fn test_type_annotations_are_separate_from_text() {
        let function = single_function("fun foo(): @JvmSuppressWildcards List<Foo> = TODO()");
        let return_type = function.return_type.expect("return type");
        assert_eq!(return_type.text, "List<Foo>");
        assert!(return_type.has_annotation_named("JvmSuppressWildcards"));
    }

    #[test]
    fn test_extension_receiver() {
        let function = single_function("fun <T> List<T>.second(): T = this[1]");
        assert_eq!(function.name, "second");
        assert_eq!(function.receiver.as_ref().map(|r| r.text.as_str()), Some("List<T>"));
        assert!(function.is_type_parameter("T"));

        let function = single_function("fun a.b.Foo.bar() {}");
        assert_eq!(function.name, "bar");
        assert_eq!(function.receiver.as_ref().map(|r| r.text.as_str()), Some("a.b.Foo"));
    }

    #[test]
    fn test_parameters() {
        let function = single_function(
            "fun foo(@Named(\"a\") a: Lazy<Foo>, vararg b: Int = 3, c: (Int) -> Unit = { }) {}",
        );
        let names: Vec<_> = function.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(function.parameters[0].annotations[0].arguments, vec!["\"a\""]);
        assert_eq!(
            function.parameters[0].type_ref.as_ref().map(|t| t.text.as_str()),
            Some("Lazy<Foo>")
        );
    }

    #[test]
    fn test_members_after_properties_are_found() {
        let file = parse_source(
            "class A {\n    val x = listOf(1)\n    fun b() = x\n        .map { it }\n    init { println() }\n    fun c() {}\n}\n",
        );
        assert!(file.errors.is_empty(), "{:?}", file.errors);
        let names: Vec<_> = file.classes[0].functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_unclosed_brace_is_reported() {
        let file = parse_source("class A {\n    fun b() {\n");
        assert!(file.has_errors());
        assert_eq!(file.classes[0].name, "A");
    }

    #[test]
    fn test_stray_top_level_token_is_reported() {
        let file = parse_source("package a\n\n) class B");
        assert_eq!(file.errors[0].code, ErrorCode::E0901);
        assert_eq!(file.classes[0].name, "B");
    }
}
