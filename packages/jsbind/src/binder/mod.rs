/**
 * Binder
 *
 * Walks a node tree, parses each element's binding attribute and owns the resulting
 * bindings until disposal
 */
pub mod dispatcher;

use log::{debug, warn};

use crate::config::{BinderConfig, ErrorPolicy};
use crate::directives::{EventDirective, ForEachDirective, PropDirective, TemplateDirective};
use crate::error::Result;
use crate::expression_parser::Parser;

pub use dispatcher::{dispatch, Dispatched};

/// A live connection between a directive and its element
pub trait Binding {
    /// Push the current value through. Called once right after construction.
    fn evaluate(&mut self) -> anyhow::Result<()>;

    /// Release listeners and nested binders. Called exactly once.
    fn dispose(&mut self);
}

/// What a factory sees when asked for a binding
#[derive(Debug)]
pub struct BindingContext<'a, E, C> {
    pub element: &'a E,
    pub data: &'a C,
    pub parent: Option<&'a C>,
}

impl<E, C> Clone for BindingContext<'_, E, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, C> Copy for BindingContext<'_, E, C> {}

/// Builds bindings for each directive kind. Every directive is moved into exactly one
/// call.
pub trait BindingFactory<E, C> {
    type Binding: Binding;

    fn prop(
        &mut self,
        directive: PropDirective,
        context: &BindingContext<'_, E, C>,
    ) -> anyhow::Result<Self::Binding>;

    fn for_each(
        &mut self,
        directive: ForEachDirective,
        context: &BindingContext<'_, E, C>,
    ) -> anyhow::Result<Self::Binding>;

    fn event(
        &mut self,
        directive: EventDirective,
        context: &BindingContext<'_, E, C>,
    ) -> anyhow::Result<Self::Binding>;

    fn template(
        &mut self,
        directive: TemplateDirective,
        context: &BindingContext<'_, E, C>,
    ) -> anyhow::Result<Self::Binding>;
}

/// Minimal view of a document node
pub trait Node: Sized {
    fn is_element(&self) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;

    fn child_nodes(&self) -> Vec<Self>;
}

/// Owns every binding created under one root. Nested scopes (`forEach` items,
/// templates) are expected to hold their own `Binder`, so disposal runs depth first.
pub struct Binder<B: Binding> {
    bindings: Vec<B>,
    config: BinderConfig,
    parser: Parser,
}

impl<B: Binding> Binder<B> {
    pub fn new(config: BinderConfig) -> Self {
        let parser = Parser::with_options(config.parser.clone());
        Binder {
            bindings: Vec::new(),
            config,
            parser,
        }
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn bindings(&self) -> &[B] {
        &self.bindings
    }

    /// Bind `root` and its descendants. With [`ErrorPolicy::Abort`] the first failure
    /// disposes everything this binder holds.
    pub fn bind<N, C, F>(
        &mut self,
        root: &N,
        data: &C,
        parent: Option<&C>,
        factory: &mut F,
    ) -> Result<()>
    where
        N: Node,
        F: BindingFactory<N, C, Binding = B>,
    {
        let result = self.setup(root, data, parent, factory);
        if result.is_err() {
            self.dispose();
        }
        result
    }

    fn setup<N, C, F>(&mut self, node: &N, data: &C, parent: Option<&C>, factory: &mut F) -> Result<()>
    where
        N: Node,
        F: BindingFactory<N, C, Binding = B>,
    {
        let mut child_nodes_bound = false;

        if node.is_element() {
            if let Some(text) = node
                .attribute(&self.config.attribute_name)
                .filter(|text| !text.is_empty())
            {
                let context = BindingContext {
                    element: node,
                    data,
                    parent,
                };
                match self.bind_element(&text, &context, factory) {
                    Ok(handles_children) => child_nodes_bound = handles_children,
                    Err(err) => match self.config.on_error {
                        ErrorPolicy::Abort => return Err(err),
                        ErrorPolicy::SkipElement => {
                            warn!("skipping element with binding [{}]: {}", text, err)
                        }
                    },
                }
            }
        }

        if !child_nodes_bound {
            for child in node.child_nodes() {
                self.setup(&child, data, parent, factory)?;
            }
        }

        Ok(())
    }

    fn bind_element<N, C, F>(
        &mut self,
        text: &str,
        context: &BindingContext<'_, N, C>,
        factory: &mut F,
    ) -> Result<bool>
    where
        F: BindingFactory<N, C, Binding = B>,
    {
        let directives = self.parser.parse_directives(text)?;
        let dispatched = dispatch(directives, context, factory)?;
        self.bindings.extend(dispatched.bindings);
        Ok(dispatched.handles_children)
    }

    /// Dispose every owned binding. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.bindings.is_empty() {
            debug!("disposing {} binding(s)", self.bindings.len());
        }
        for mut binding in self.bindings.drain(..) {
            binding.dispose();
        }
    }
}

impl<B: Binding> Drop for Binder<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
