// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和印尼语（现场收银员界面）
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "id"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use mangrove_pos::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        // 中文
        set_locale("zh-CN");
        assert_eq!(t("common.success"), "操作成功");

        // 印尼语
        set_locale("id");
        assert_eq!(t("common.success"), "Operasi berhasil");

        // 恢复默认语言
        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_catalog_messages() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("id");
        let msg = t("catalog.deactivated");
        assert!(msg.contains("NON-AKTIF"));

        set_locale("zh-CN");
        let msg = t("catalog.deactivated");
        assert!(msg.contains("停用"));
    }
}
