//! 预编译的格式匹配表
//!
//! 所有正则在第一次使用时编译，之后全进程只读共享。

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    // 表内的模式都是常量，编译失败只可能是代码错误
    Regex::new(pattern).unwrap_or_else(|e| panic!("built-in pattern {pattern:?} is invalid: {e}"))
}

pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| compile(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"));

/// http / https / ftp 或协议相对地址；主机可以是 IPv4、域名或 localhost
pub static URL: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"^(?:(?:https?|ftp):)?//",
        r"(?:",
        r"(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])",
        r"|localhost",
        r"|(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}",
        r")",
        r"(?::[0-9]{1,5})?",
        r"(?:[/?#]\S*)?$",
    ))
});

/// 大陆手机号：1[3-9] 开头共 11 位
pub static PHONE: Lazy<Regex> = Lazy::new(|| compile(r"^1[3-9][0-9]{9}$"));

/// 18 位身份证号：地区码 + 出生日期（1800-2099）+ 顺序码 + 校验位
pub static ID_CARD: Lazy<Regex> = Lazy::new(|| {
    compile(r"^[1-9][0-9]{5}(?:18|19|20)[0-9]{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12][0-9]|3[01])[0-9]{3}[0-9Xx]$")
});

pub static POSITIVE_INTEGER: Lazy<Regex> = Lazy::new(|| compile(r"^[1-9][0-9]*$"));

/// 十进制数字文本，允许符号、小数和指数部分
pub static NUMBER: Lazy<Regex> =
    Lazy::new(|| compile(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$"));

pub static CHINESE: Lazy<Regex> = Lazy::new(|| compile(r"^[\x{4e00}-\x{9fa5}]+$"));

pub static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*$"));

/// 格式标记到字符类的映射，供 `require_format` 使用
pub const FORMAT_TOKENS: &[(&str, &str)] = &[
    ("number", "0-9"),
    ("letter", "a-zA-Z"),
    ("chinese", r"\x{4e00}-\x{9fa5}"),
];

/// 查找格式标记对应的字符类，未知标记返回 None
pub fn format_class(token: &str) -> Option<&'static str> {
    let canonical = match token {
        "digit" => "number",
        "cjk" => "chinese",
        other => other,
    };
    FORMAT_TOKENS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, class)| *class)
}

/// 按标记组合出整串匹配的正则
///
/// 未知标记被忽略；一个已知标记都没有时返回 None。
pub fn format_matcher<S: AsRef<str>>(tokens: &[S]) -> Option<Regex> {
    let mut classes: Vec<&'static str> = Vec::new();
    for class in tokens.iter().filter_map(|t| format_class(t.as_ref())) {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    if classes.is_empty() {
        return None;
    }
    Regex::new(&format!("^[{}]+$", classes.concat())).ok()
}
