//! Directive dispatch
//!
//! Turns one parsed attribute into live bindings: construction in declaration order,
//! then evaluation as `template`, `forEach`, then `prop`/`event` as declared.

use log::debug;

use super::{Binding, BindingContext, BindingFactory};
use crate::directives::{Directive, DirectiveKind, DirectiveSet};
use crate::error::{BindError, Result};

/// Bindings created for one attribute
#[derive(Debug)]
pub struct Dispatched<B> {
    /// Declaration order
    pub bindings: Vec<B>,
    /// A `forEach` or `template` binding took ownership of the element's children
    pub handles_children: bool,
}

/// Construct and evaluate every directive of `directives`.
///
/// When a factory call or an evaluation fails, the bindings already built for this
/// attribute are disposed in reverse construction order before the error is returned.
pub fn dispatch<E, C, F>(
    directives: DirectiveSet,
    context: &BindingContext<'_, E, C>,
    factory: &mut F,
) -> Result<Dispatched<F::Binding>>
where
    F: BindingFactory<E, C>,
{
    let handles_children = directives.handles_children();
    let order = directives.evaluation_order();
    let kinds: Vec<DirectiveKind> = directives.iter().map(Directive::kind).collect();

    let mut bindings = Vec::with_capacity(directives.len());
    for directive in directives {
        let kind = directive.kind();
        let created = match directive {
            Directive::Prop(d) => factory.prop(d, context),
            Directive::ForEach(d) => factory.for_each(d, context),
            Directive::Event(d) => factory.event(d, context),
            Directive::Template(d) => factory.template(d, context),
        };

        match created {
            Ok(binding) => bindings.push(binding),
            Err(source) => {
                teardown(&mut bindings);
                return Err(BindError::Construction { kind, source });
            }
        }
    }

    for index in order {
        if let Err(source) = bindings[index].evaluate() {
            teardown(&mut bindings);
            return Err(BindError::Evaluation {
                kind: kinds[index],
                source,
            });
        }
    }

    debug!(
        "dispatched {} binding(s), children handled: {}",
        bindings.len(),
        handles_children
    );

    Ok(Dispatched {
        bindings,
        handles_children,
    })
}

fn teardown<B: Binding>(bindings: &mut Vec<B>) {
    while let Some(mut binding) = bindings.pop() {
        binding.dispose();
    }
}
