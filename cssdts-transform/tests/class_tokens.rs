use std::path::Path;

use cssdts_transform::{ClassTokenTransformer, TransformError, Transformer};
use pretty_assertions::assert_eq;

const BUTTON_CSS: &str = r#"
/* Button component
   .commented-out { } */
@charset "utf-8";

.button {
  composes: base from "./base.css";
  padding: 0.25rem 1rem;
  background: url("data:image/svg+xml;utf8,<svg></svg>");
}

.button.is-primary,
.button:not(.is-disabled):hover {
  color: white;
}

@media screen and (max-width: 40.5em) {
  .button { width: 100%; }
  .button-label::after { content: "}"; }
}

@keyframes pulse {
  from { opacity: 0.5; }
  to { opacity: 1; }
}

:export {
  buttonHeight: 2rem;
}
"#;

#[test]
fn realistic_stylesheet_with_camel_case() {
    let out = ClassTokenTransformer::new(true)
        .transform(Path::new("button.css"), BUTTON_CSS)
        .expect("transform");

    assert_eq!(
        out.text,
        "export const button: string;\n\
         export const isPrimary: string;\n\
         export const isDisabled: string;\n\
         export const buttonLabel: string;\n\
         export const buttonHeight: string;\n"
    );
    assert!(out.diagnostics.is_empty());
}

#[test]
fn realistic_stylesheet_without_camel_case_reports_dashed_tokens() {
    let out = ClassTokenTransformer::new(false)
        .transform(Path::new("button.css"), BUTTON_CSS)
        .expect("transform");

    assert_eq!(
        out.text,
        "export const button: string;\nexport const buttonHeight: string;\n"
    );
    assert_eq!(
        out.diagnostics,
        vec![
            "\"is-primary\" is not valid TypeScript variable name.".to_string(),
            "\"is-disabled\" is not valid TypeScript variable name.".to_string(),
            "\"button-label\" is not valid TypeScript variable name.".to_string(),
        ]
    );
}

#[test]
fn transformer_is_usable_as_trait_object() {
    let transformer: Box<dyn Transformer> = Box::new(ClassTokenTransformer::default());
    let err = transformer
        .transform(Path::new("broken.css"), ".a { }\n.b { }\n}")
        .unwrap_err();
    assert_eq!(err, TransformError::UnexpectedCloseBrace { line: 3 });
}
