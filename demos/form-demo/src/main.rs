use serde_json::json;
use sieve_core::prelude::*;
use sieve_validator::Validator;

// ==================== 表单字段 ====================

fn check_signup(options: &ValidatorOptions) -> Vec<Validator> {
    let mut username = Validator::with_options("ab", "用户名", options.clone());
    username.is_required().length_range(3, 16).require_format(&["letter", "number"]);

    let mut email = Validator::with_options("test@example.com", "邮箱", options.clone());
    email.is_required().is_email();

    let mut phone = Validator::with_options("12345678901", "手机号", options.clone());
    phone.is_required().is_phone();

    let mut age = Validator::with_options("27", "年龄", options.clone());
    age.is_number().number_range(18.0, 120.0);

    let mut tags = Validator::with_options(json!(["rust"]), "标签", options.clone());
    tags.is_required()
        .try_custom(|v| -> Result<bool> {
            let items = v.as_array().context("tags must be a list")?;
            Ok(items.iter().all(|t| t.is_string()))
        });

    vec![username, email, phone, age, tags]
}

fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let options = match std::env::args().nth(1) {
        Some(path) => ValidatorOptions::from_file(&path)?,
        None => ValidatorOptions::from_env()?,
    };

    let fields = check_signup(&options);
    let failed = fields.iter().filter(|f| !f.passed()).count();

    for field in &fields {
        tracing::info!("{:<6} {}", field.label(), field.current_message());
    }
    tracing::info!("{} of {} fields failed", failed, fields.len());

    Ok(())
}
