//! Template listing handed to the language model when it picks a template

use crate::template::{Template, TemplateCatalog};

/// One line describing a template: id, name, slot count and example captions
pub fn describe_template(template: &Template) -> String {
    let example = serde_json::Value::from(template.example_lines().to_vec());
    format!(
        "{{id: {}, name: {}, lines: {}, example: {}}}",
        template.id,
        template.name,
        template.required_line_count(),
        example
    )
}

/// Describe every template in catalog order
pub fn describe_templates(catalog: &TemplateCatalog) -> Vec<String> {
    catalog.templates().iter().map(describe_template).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_template_with_example() {
        let drake = Template::new("drake", "Drakeposting", 2)
            .with_example_lines(["left on read", "right on red"]);
        assert_eq!(
            describe_template(&drake),
            r#"{id: drake, name: Drakeposting, lines: 2, example: ["left on read","right on red"]}"#
        );
    }

    #[test]
    fn test_describe_template_escapes_example() {
        let t = Template::new("cmm", "Change My Mind", 1).with_example_lines([r#"say "hi""#]);
        assert_eq!(
            describe_template(&t),
            r#"{id: cmm, name: Change My Mind, lines: 1, example: ["say \"hi\""]}"#
        );
    }

    #[test]
    fn test_describe_templates_listing() {
        let catalog = TemplateCatalog::from_json_str(
            r#"[
                {"id": "doge", "name": "Doge", "example": {"text": ["such meme", "very skill"]}},
                {"id": "cmm", "name": "Change My Mind", "lines": 1},
                {"id": "blank", "name": "Blank", "lines": 0}
            ]"#,
        )
        .expect("Should parse");

        insta::assert_snapshot!(describe_templates(&catalog).join("\n"), @r###"
        {id: doge, name: Doge, lines: 2, example: ["such meme","very skill"]}
        {id: cmm, name: Change My Mind, lines: 1, example: []}
        {id: blank, name: Blank, lines: 0, example: []}
        "###);
    }
}
