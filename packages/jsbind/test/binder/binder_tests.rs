/**
 * Binder Tests
 *
 * Tree walk, nested scopes, error policies and disposal
 */
mod support;

#[cfg(test)]
mod tests {
    use super::support::*;
    use jsbind::config::{BinderConfig, ErrorPolicy};
    use jsbind::evaluator::Value;
    use jsbind::{BindError, Binder};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn binder() -> Binder<RecordingBinding> {
        init_logging();
        Binder::new(BinderConfig::default())
    }

    #[test]
    fn walks_elements_depth_first() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({ "title": "T", "name": "N", "go": 1 }));
        let root = TestNode::element("section")
            .bind("prop:title = title")
            .child(TestNode::text("hello"))
            .child(
                TestNode::element("div")
                    .child(TestNode::element("span").bind("event:click = go")),
            )
            .child(TestNode::element("p").bind("prop:text = name"));

        let mut binder = binder();
        binder.bind(&root, &data, None, &mut factory).unwrap();

        assert_eq!(
            take(&trace),
            vec![
                "create section/prop:title",
                "evaluate section/prop:title = T",
                "create span/event:click",
                "evaluate span/event:click = 1",
                "create p/prop:text",
                "evaluate p/prop:text = N",
            ]
        );
        assert_eq!(binder.bindings().len(), 3);

        binder.dispose();
        assert_eq!(
            take(&trace),
            vec![
                "dispose section/prop:title",
                "dispose span/event:click",
                "dispose p/prop:text",
            ]
        );
    }

    #[test]
    fn leaves_children_to_for_each() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({
            "rows": [{ "label": "a" }, { "label": "b" }],
            "suffix": "!"
        }));
        let root = TestNode::element("ul")
            .bind("forEach = rows")
            .child(TestNode::element("li").bind("prop:text = label + suffix"));

        let mut binder = binder();
        binder.bind(&root, &data, None, &mut factory).unwrap();

        assert_eq!(
            take(&trace),
            vec![
                "create ul/forEach",
                "evaluate ul/forEach = [object Object],[object Object]",
                "create li/prop:text",
                "evaluate li/prop:text = a!",
                "create li/prop:text",
                "evaluate li/prop:text = b!",
            ]
        );
        assert_eq!(binder.bindings().len(), 1);
        assert_eq!(binder.bindings()[0].nested().len(), 2);

        binder.dispose();
        assert_eq!(
            take(&trace),
            vec![
                "dispose li/prop:text",
                "dispose li/prop:text",
                "dispose ul/forEach",
            ]
        );
    }

    #[test]
    fn leaves_children_to_template() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({ "row": 1 }));
        let root = TestNode::element("div")
            .bind("template:rowTemplate = row")
            .child(TestNode::element("span").bind("prop:text = row"));

        let mut binder = binder();
        binder.bind(&root, &data, None, &mut factory).unwrap();

        assert_eq!(
            take(&trace),
            vec![
                "create div/template:rowTemplate",
                "evaluate div/template:rowTemplate = 1",
            ]
        );
    }

    #[test]
    fn aborts_and_disposes_on_syntax_error() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({}));
        let root = TestNode::element("div")
            .child(TestNode::element("a").bind("prop:x = 1"))
            .child(TestNode::element("b").bind("prop:y = ("))
            .child(TestNode::element("c").bind("prop:z = 2"));

        let mut binder = binder();
        let err = binder.bind(&root, &data, None, &mut factory).unwrap_err();

        let BindError::Syntax(syntax) = &err else {
            panic!("Expected syntax error, got {}", err);
        };
        assert_eq!(syntax.message, "Unexpected end of input");
        assert_eq!(syntax.input, "prop:y = (");
        assert!(binder.bindings().is_empty());
        assert_eq!(
            take(&trace),
            vec![
                "create a/prop:x",
                "evaluate a/prop:x = 1",
                "dispose a/prop:x",
            ]
        );
    }

    #[test]
    fn aborts_on_evaluation_error() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({}));
        let root = TestNode::element("div")
            .child(TestNode::element("a").bind("prop:x = 1"))
            .child(TestNode::element("b").bind("prop:y = missing.value"));

        let mut binder = binder();
        let err = binder.bind(&root, &data, None, &mut factory).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to evaluate 'prop' binding: Cannot read property 'value' of undefined"
        );
        assert_eq!(
            take(&trace),
            vec![
                "create a/prop:x",
                "evaluate a/prop:x = 1",
                "create b/prop:y",
                "dispose b/prop:y",
                "dispose a/prop:x",
            ]
        );
    }

    #[test]
    fn skips_failing_elements_when_configured() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({}));
        let root = TestNode::element("div")
            .child(TestNode::element("a").bind("prop:x = 1"))
            .child(
                TestNode::element("b")
                    .bind("bogus:y = 1")
                    .child(TestNode::element("d").bind("prop:w = 3")),
            )
            .child(TestNode::element("c").bind("prop:z = 2"));

        init_logging();
        let mut binder =
            Binder::new(BinderConfig::default().with_error_policy(ErrorPolicy::SkipElement));
        binder.bind(&root, &data, None, &mut factory).unwrap();

        assert_eq!(
            take(&trace),
            vec![
                "create a/prop:x",
                "evaluate a/prop:x = 1",
                "create d/prop:w",
                "evaluate d/prop:w = 3",
                "create c/prop:z",
                "evaluate c/prop:z = 2",
            ]
        );
        assert_eq!(binder.bindings().len(), 3);
    }

    #[test]
    fn reads_configured_attribute_name() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({ "v": "on" }));
        let root = TestNode::element("div")
            .attr("data-bind", "prop:state = v")
            .child(TestNode::element("span").bind("prop:ignored = v"));

        let config =
            BinderConfig::from_json(r#"{ "attributeName": "data-bind", "onError": "skipElement" }"#)
                .unwrap();
        assert_eq!(config.on_error, ErrorPolicy::SkipElement);

        init_logging();
        let mut binder = Binder::new(config);
        binder.bind(&root, &data, None, &mut factory).unwrap();

        assert_eq!(
            take(&trace),
            vec!["create div/prop:state", "evaluate div/prop:state = on"]
        );
    }

    #[test]
    fn ignores_empty_attribute_and_text_roots() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({ "v": 1 }));
        let root = TestNode::element("div")
            .bind("")
            .child(TestNode::element("span").bind("prop:v = v"));

        let mut binder = binder();
        binder.bind(&root, &data, None, &mut factory).unwrap();
        binder
            .bind(&TestNode::text("plain"), &data, None, &mut factory)
            .unwrap();

        assert_eq!(
            take(&trace),
            vec!["create span/prop:v", "evaluate span/prop:v = 1"]
        );
    }

    #[test]
    fn resolves_names_through_parent_context() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({ "own": "x" }));
        let parent = Value::from(json!({ "own": "shadowed", "outer": "y" }));
        let root = TestNode::element("div").bind("prop:text = own + outer");

        let mut binder = binder();
        binder.bind(&root, &data, Some(&parent), &mut factory).unwrap();

        assert_eq!(
            take(&trace),
            vec!["create div/prop:text", "evaluate div/prop:text = xy"]
        );
    }

    #[test]
    fn disposes_once_and_on_drop() {
        let trace = trace();
        let mut factory = RecordingFactory::new(&trace);
        let data = Value::from(json!({ "v": 1 }));
        let root = TestNode::element("div").bind("prop:a = v; event:b = v");

        let mut binder = binder();
        binder.bind(&root, &data, None, &mut factory).unwrap();
        take(&trace);

        binder.dispose();
        binder.dispose();
        assert_eq!(take(&trace), vec!["dispose div/prop:a", "dispose div/event:b"]);

        {
            let mut scoped = self::binder();
            scoped.bind(&root, &data, None, &mut factory).unwrap();
            take(&trace);
        }
        assert_eq!(take(&trace), vec!["dispose div/prop:a", "dispose div/event:b"]);
    }
}
