/**
 * Directive Parser
 *
 * Directives := Directive ( ";"? Directive )* ";"?
 * Directive  := "prop" ":" PropPath "=" Expression
 *             | "forEach" "=" Expression
 *             | "event" ":" Identifier "=" Expression
 *             | "template" ":" Identifier "=" Expression
 */
use log::{debug, trace, warn};
use smallvec::smallvec;

use super::*;
use crate::config::{DuplicateDirectivePolicy, ParserOptions};
use crate::expression_parser::ast::AST;
use crate::expression_parser::parser::{ParseAST, ParseResult};

/// Parse a whole binding attribute. Any error discards every directive parsed so far.
pub fn parse_directives(input: &str, options: &ParserOptions) -> ParseResult<DirectiveSet> {
    let mut parse_ast = ParseAST::new(input, options)?;

    if parse_ast.at_eof() {
        return Err(parse_ast.error("Binding attribute declares no directives"));
    }

    let mut directives: Vec<Directive> = Vec::new();

    while !parse_ast.at_eof() {
        let directive = parse_directive(&mut parse_ast)?;
        let kind = directive.kind();
        trace!("recognized {} directive at {}", kind, directive.span().start);

        if kind.is_singleton() {
            if let Some(previous) = directives.iter().position(|d| d.kind() == kind) {
                match options.duplicate_directives {
                    DuplicateDirectivePolicy::Reject => {
                        return Err(parse_ast.error_at(
                            format!("Duplicate '{}' directive", kind),
                            directive.span().start,
                        ));
                    }
                    DuplicateDirectivePolicy::LastWins => {
                        warn!(
                            "'{}' declared more than once in [{}], keeping the last one",
                            kind, input
                        );
                        directives.remove(previous);
                    }
                }
            }
        }

        directives.push(directive);
        parse_ast.consume_optional_punctuation(';')?;
    }

    debug!("parsed {} directive(s) from [{}]", directives.len(), input);
    Ok(DirectiveSet::new(directives))
}

fn parse_directive(parse_ast: &mut ParseAST<'_>) -> ParseResult<Directive> {
    let start = parse_ast.input_index();
    let name = parse_ast.expect_identifier()?;

    let kind = DirectiveKind::from_name(&name).ok_or_else(|| {
        parse_ast.error_at(format!("Unexpected binding type '{}'", name), start)
    })?;

    let directive = match kind {
        DirectiveKind::Prop => {
            parse_ast.expect_punctuation(':')?;
            let mut property_path: PropertyPath = smallvec![parse_ast.expect_identifier()?];
            while parse_ast.consume_optional_punctuation('.')? {
                property_path.push(parse_ast.expect_identifier()?);
            }
            let expr = parse_binding_expression(parse_ast)?;
            Directive::Prop(PropDirective {
                span: parse_ast.span(start),
                property_path,
                expr,
            })
        }
        DirectiveKind::ForEach => {
            let expr = parse_binding_expression(parse_ast)?;
            Directive::ForEach(ForEachDirective {
                span: parse_ast.span(start),
                expr,
            })
        }
        DirectiveKind::Event => {
            parse_ast.expect_punctuation(':')?;
            let event_name = parse_ast.expect_identifier()?;
            let expr = parse_binding_expression(parse_ast)?;
            Directive::Event(EventDirective {
                span: parse_ast.span(start),
                event_name,
                expr,
            })
        }
        DirectiveKind::Template => {
            parse_ast.expect_punctuation(':')?;
            let source_id = parse_ast.expect_identifier()?;
            let expr = parse_binding_expression(parse_ast)?;
            Directive::Template(TemplateDirective {
                span: parse_ast.span(start),
                source_id,
                expr,
            })
        }
    };

    Ok(directive)
}

/// `"=" Expression`
fn parse_binding_expression(parse_ast: &mut ParseAST<'_>) -> ParseResult<AST> {
    parse_ast.expect_operator("=")?;
    parse_ast.parse_expression()
}
