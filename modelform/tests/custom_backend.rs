//! A form library plugged in through its own validator and field types.

use modelform::{
    Converter, ConverterConfig, DefaultFactory, FactoryRegistry, FieldKind, FieldOptions,
    FormBackend, ModelSchema, ValidatorFactory,
};
use serde_json::json;
use tempfile::TempDir;

#[derive(Debug, PartialEq)]
enum HtmlRule {
    Skippable,
    MustHaveValue,
}

#[derive(Debug)]
struct HtmlInput {
    name: String,
    input_type: &'static str,
    label: String,
    required_attr: bool,
    rules: Vec<HtmlRule>,
}

struct HtmlBackend;

impl ValidatorFactory for HtmlBackend {
    type Validator = HtmlRule;

    fn optional(&self) -> HtmlRule {
        HtmlRule::Skippable
    }

    fn data_required(&self) -> HtmlRule {
        HtmlRule::MustHaveValue
    }
}

impl FormBackend for HtmlBackend {
    type Field = HtmlInput;

    fn build_field(
        &self,
        name: &str,
        kind: FieldKind,
        options: FieldOptions<HtmlRule>,
    ) -> HtmlInput {
        let input_type = match kind {
            FieldKind::Integer | FieldKind::Float | FieldKind::Decimal => "number",
            FieldKind::Boolean => "checkbox",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime-local",
            FieldKind::Text | FieldKind::List => "text",
        };
        HtmlInput {
            name: name.to_string(),
            input_type,
            label: options.label,
            required_attr: options.validators.contains(&HtmlRule::MustHaveValue),
            rules: options.validators,
        }
    }
}

const SIGNUP_YAML: &str = r#"
name: Signup
fields:
  - name: username
    type: { kind: string }
    description: Public handle
  - name: birthday
    type: { kind: optional, inner: { kind: date } }
  - name: newsletter
    type: { kind: boolean }
    default: false
  - name: referral_code
    type: { kind: string }
    default_factory: no_referral
"#;

fn registry() -> FactoryRegistry {
    FactoryRegistry::new().register(DefaultFactory::new("no_referral", || json!("")))
}

#[tokio::test]
async fn test_loaded_schema_converts_with_custom_backend() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("signup.yaml");
    tokio::fs::write(&path, SIGNUP_YAML).await.unwrap();

    let schema = ModelSchema::load(&path, &registry()).await.unwrap();
    let form = Converter::new(HtmlBackend).convert(&schema).unwrap();

    let username = form.field("username").unwrap();
    assert_eq!(username.input_type, "text");
    assert!(username.required_attr);
    assert_eq!(username.rules, vec![HtmlRule::MustHaveValue]);

    let birthday = form.field("birthday").unwrap();
    assert_eq!(birthday.input_type, "date");
    assert_eq!(birthday.rules, vec![HtmlRule::Skippable]);

    let newsletter = form.field("newsletter").unwrap();
    assert_eq!(newsletter.input_type, "checkbox");
    assert!(!newsletter.required_attr);

    assert_eq!(
        form.field("referral_code").unwrap().rules,
        vec![HtmlRule::Skippable]
    );
}

#[test]
fn test_config_overrides_reach_custom_backend() {
    let schema = ModelSchema::from_yaml(SIGNUP_YAML, &registry()).unwrap();

    let mut config = ConverterConfig {
        only: Some(["username", "newsletter"].into_iter().map(String::from).collect()),
        ..Default::default()
    };
    config.required.insert("newsletter".into(), true);
    config.labels.insert("username".into(), "User name".into());

    let form = Converter::new(HtmlBackend)
        .with_config(config)
        .convert(&schema)
        .unwrap();

    let names: Vec<&str> = form.fields.values().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["username", "newsletter"]);
    assert_eq!(form.field("username").unwrap().label, "User name");
    assert!(form.field("newsletter").unwrap().required_attr);
}
