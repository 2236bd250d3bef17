use crate::settings::{get_settings, update_settings};
use std::sync::OnceLock;
use std::sync::RwLock;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    #[value(name = "en")]
    English,
    #[value(name = "zh")]
    Chinese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh-tw" | "chinese" => Language::Chinese,
            _ => Language::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Global language state
fn language_store() -> &'static RwLock<Language> {
    static STORE: OnceLock<RwLock<Language>> = OnceLock::new();
    STORE.get_or_init(|| {
        let lang = if cfg!(test) {
            // Keep unit tests deterministic and avoid reading real user settings.
            Language::English
        } else {
            get_settings()
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or(Language::English)
        };
        RwLock::new(lang)
    })
}

/// Get current language
pub fn current_language() -> Language {
    language_store()
        .read()
        .map(|lang| *lang)
        .unwrap_or(Language::English)
}

/// Switch language for this process only (e.g. `--lang`)
pub fn use_language(lang: Language) {
    if let Ok(mut guard) = language_store().write() {
        *guard = lang;
    }
}

/// Set current language and persist
pub fn set_language(lang: Language) -> Result<(), crate::error::AppError> {
    use_language(lang);

    let mut settings = get_settings();
    settings.language = Some(lang.code().to_string());
    update_settings(settings)
}

/// Check if current language is Chinese
pub fn is_chinese() -> bool {
    current_language() == Language::Chinese
}

pub mod texts {
    use super::is_chinese;
    use crate::mode::SelectionMode;

    // ============================================
    // FORM LABELS (表单字段)
    // ============================================

    pub fn custom_option_label() -> &'static str {
        if is_chinese() {
            "自定义"
        } else {
            "Custom"
        }
    }

    pub fn base_url_label() -> &'static str {
        if is_chinese() {
            "MiniMax 基础 URL"
        } else {
            "MiniMax Base URL"
        }
    }

    pub fn custom_url_placeholder() -> &'static str {
        "https://api.example.com/anthropic"
    }

    pub fn api_key_label() -> &'static str {
        if is_chinese() {
            "MiniMax API 密钥"
        } else {
            "MiniMax API Key"
        }
    }

    pub fn api_key_placeholder() -> &'static str {
        if is_chinese() {
            "请输入 API 密钥..."
        } else {
            "Enter API Key..."
        }
    }

    pub fn api_key_storage_notice() -> &'static str {
        if is_chinese() {
            "API 密钥仅保存在本地配置文件中"
        } else {
            "API keys are stored locally in your provider settings file"
        }
    }

    pub fn get_api_key() -> &'static str {
        if is_chinese() {
            "获取 MiniMax API 密钥"
        } else {
            "Get MiniMax API Key"
        }
    }

    pub fn mode_label() -> &'static str {
        if is_chinese() {
            "模式"
        } else {
            "Mode"
        }
    }

    pub fn mode_name(mode: SelectionMode) -> &'static str {
        match (mode, is_chinese()) {
            (SelectionMode::Preset, true) => "预设",
            (SelectionMode::Preset, false) => "Preset",
            (SelectionMode::Custom, true) => "自定义",
            (SelectionMode::Custom, false) => "Custom",
        }
    }

    pub fn not_set() -> &'static str {
        if is_chinese() {
            "（未设置）"
        } else {
            "(not set)"
        }
    }

    pub fn config_file_label() -> &'static str {
        if is_chinese() {
            "配置文件"
        } else {
            "Config file"
        }
    }

    pub fn header_label() -> &'static str {
        if is_chinese() {
            "名称"
        } else {
            "Label"
        }
    }

    // ============================================
    // RESULTS (操作结果)
    // ============================================

    pub fn endpoint_switched(label: &str) -> String {
        if is_chinese() {
            format!("✓ 已切换到 {label}")
        } else {
            format!("✓ Switched to {label}")
        }
    }

    pub fn custom_url_saved(url: &str) -> String {
        if is_chinese() {
            format!("✓ 已保存自定义 URL: {url}")
        } else {
            format!("✓ Custom URL saved: {url}")
        }
    }

    pub fn api_key_saved() -> &'static str {
        if is_chinese() {
            "✓ API 密钥已保存"
        } else {
            "✓ API key saved"
        }
    }

    pub fn save_failed(err: &str) -> String {
        if is_chinese() {
            format!("保存失败: {err}")
        } else {
            format!("Save failed: {err}")
        }
    }

    pub fn unknown_endpoint_zh(value: &str) -> String {
        format!("未知的预设端点: {value}（可使用 `custom` 命令设置自定义 URL）")
    }

    pub fn unknown_endpoint_en(value: &str) -> String {
        format!("Unknown preset endpoint: {value} (use the `custom` command for other URLs)")
    }

    // ============================================
    // INTERACTIVE MODE (交互模式)
    // ============================================

    pub fn welcome_title() -> &'static str {
        if is_chinese() {
            "MiniMax 端点切换"
        } else {
            "MiniMax Endpoint Switch"
        }
    }

    pub fn main_menu_prompt() -> &'static str {
        if is_chinese() {
            "请选择操作"
        } else {
            "What would you like to do?"
        }
    }

    pub fn menu_select_endpoint() -> &'static str {
        if is_chinese() {
            "🌐 选择端点"
        } else {
            "🌐 Select endpoint"
        }
    }

    pub fn menu_edit_custom_url() -> &'static str {
        if is_chinese() {
            "✏️  编辑自定义 URL"
        } else {
            "✏️  Edit custom URL"
        }
    }

    pub fn menu_set_api_key() -> &'static str {
        if is_chinese() {
            "🔑 设置 API 密钥"
        } else {
            "🔑 Set API key"
        }
    }

    pub fn menu_show() -> &'static str {
        if is_chinese() {
            "👁️  查看当前配置"
        } else {
            "👁️  View current configuration"
        }
    }

    pub fn menu_language() -> &'static str {
        if is_chinese() {
            "🌍 切换语言"
        } else {
            "🌍 Change language"
        }
    }

    pub fn menu_exit() -> &'static str {
        if is_chinese() {
            "🚪 退出"
        } else {
            "🚪 Exit"
        }
    }

    pub fn select_endpoint_prompt() -> &'static str {
        if is_chinese() {
            "选择 API 端点:"
        } else {
            "Select API endpoint:"
        }
    }

    pub fn custom_url_prompt() -> &'static str {
        if is_chinese() {
            "自定义基础 URL:"
        } else {
            "Custom base URL:"
        }
    }

    pub fn api_key_prompt() -> &'static str {
        if is_chinese() {
            "API 密钥:"
        } else {
            "API key:"
        }
    }

    pub fn select_language() -> &'static str {
        if is_chinese() {
            "选择语言:"
        } else {
            "Select language:"
        }
    }

    pub fn language_changed() -> &'static str {
        if is_chinese() {
            "✓ 语言已切换"
        } else {
            "✓ Language changed"
        }
    }

    pub fn press_enter() -> &'static str {
        if is_chinese() {
            "按 Enter 继续..."
        } else {
            "Press Enter to continue..."
        }
    }

    pub fn error_prefix() -> &'static str {
        if is_chinese() {
            "错误"
        } else {
            "Error"
        }
    }

    pub fn goodbye() -> &'static str {
        if is_chinese() {
            "👋 再见！"
        } else {
            "👋 Goodbye!"
        }
    }

    pub fn interactive_requires_tty() -> &'static str {
        if is_chinese() {
            "交互模式需要在终端中运行"
        } else {
            "Interactive mode requires a TTY"
        }
    }

    // ============================================
    // TUI (全屏表单)
    // ============================================

    pub fn tui_title() -> &'static str {
        if is_chinese() {
            " MiniMax 供应商配置 "
        } else {
            " MiniMax Provider "
        }
    }

    pub fn tui_fields_title() -> &'static str {
        if is_chinese() {
            "字段"
        } else {
            "Fields"
        }
    }

    pub fn tui_input_title() -> &'static str {
        if is_chinese() {
            "输入"
        } else {
            "Input"
        }
    }

    pub fn tui_editing_title() -> &'static str {
        if is_chinese() {
            "编辑中（实时保存）"
        } else {
            "Editing (saved as you type)"
        }
    }

    pub fn tui_picker_title() -> &'static str {
        if is_chinese() {
            "选择端点"
        } else {
            "Select endpoint"
        }
    }

    pub fn tui_key_move() -> &'static str {
        if is_chinese() {
            "移动"
        } else {
            "move"
        }
    }

    pub fn tui_key_edit() -> &'static str {
        if is_chinese() {
            "编辑/选择"
        } else {
            "edit/select"
        }
    }

    pub fn tui_key_done() -> &'static str {
        if is_chinese() {
            "完成"
        } else {
            "done"
        }
    }

    pub fn tui_key_cursor() -> &'static str {
        if is_chinese() {
            "光标"
        } else {
            "cursor"
        }
    }

    pub fn tui_key_reload() -> &'static str {
        if is_chinese() {
            "重新加载"
        } else {
            "reload"
        }
    }

    pub fn tui_key_quit() -> &'static str {
        if is_chinese() {
            "退出"
        } else {
            "quit"
        }
    }

    pub fn tui_key_apply() -> &'static str {
        if is_chinese() {
            "应用"
        } else {
            "apply"
        }
    }

    pub fn tui_key_cancel() -> &'static str {
        if is_chinese() {
            "取消"
        } else {
            "cancel"
        }
    }

    pub fn tui_toast_reloaded() -> &'static str {
        if is_chinese() {
            "已从磁盘重新加载"
        } else {
            "Reloaded from disk"
        }
    }

    pub fn tui_toast_reload_failed(err: &str) -> String {
        if is_chinese() {
            format!("重新加载失败: {err}")
        } else {
            format!("Reload failed: {err}")
        }
    }

    pub fn tui_terminal_error() -> &'static str {
        if is_chinese() {
            "终端初始化失败"
        } else {
            "Failed to initialise terminal"
        }
    }
}
