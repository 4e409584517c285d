//! Flat bilingual text table for every user-facing string.
//!
//! Lookup is by stable key; the language is always passed explicitly by
//! the caller. Unknown keys come back verbatim so a missing entry shows
//! up in the output instead of panicking.

use crate::types::Language;

/// Translate `key` for `lang`. Returns the key itself when no entry
/// exists.
pub fn tr(lang: Language, key: &'static str) -> &'static str {
    let (en, zh): (&'static str, &'static str) = match key {
        // Banner and menu
        "app_title" => ("🚀 TRIZ Advisor", "🚀 TRIZ助手"),
        "app_subtitle" => ("Intelligent problem solving made simple", "智能问题解决，简单高效"),
        "menu_title" => ("🚀 TRIZ Advisor", "🚀 TRIZ助手"),
        "menu_analyze" => ("🎯 Analyze Problem", "🎯 分析问题"),
        "menu_brainstorm" => ("💡 Quick Brainstorm", "💡 快速头脑风暴"),
        "menu_export" => ("📊 Export Solutions", "📊 导出解决方案"),
        "menu_more" => ("📈 History & More", "📈 历史记录和更多"),
        "menu_exit" => ("❌ Exit", "❌ 退出"),
        // Shows the language you would switch to, not the current one.
        "menu_language" => ("🌐 中文", "🌐 English"),

        // Prompts
        "prompt_choice" => ("Choose option (1-4, 0 to exit)", "选择选项 (1-4, 0退出)"),
        "prompt_problem" => ("Describe your problem", "描述您的问题"),
        "prompt_export_format" => ("Format (1=JSON, 2=Text, Enter=JSON)", "格式 (1=JSON, 2=文本, 回车=JSON)"),
        "prompt_continue" => ("Press Enter to continue...", "按回车键继续..."),
        "prompt_action" => (
            "Action (f1-f5 to favorite, 'v' view favorites, Enter to continue)",
            "操作 (f1-f5收藏, 'v'查看收藏, 回车继续)",
        ),

        // Messages
        "msg_invalid_choice" => ("❌ Invalid choice, please try again", "❌ 无效选择，请重新输入"),
        "msg_thank_you" => ("👋 Thank you for using TRIZ Advisor!", "👋 感谢使用TRIZ助手！"),
        "msg_details_required" => (
            "Please provide more details (at least 10 characters)",
            "请提供更多详细信息（至少10个字符）",
        ),
        "msg_added_favorite" => ("Added to favorites", "已添加到收藏夹"),
        "msg_removed_favorite" => ("Removed from favorites", "已从收藏夹移除"),
        "msg_not_found" => ("No such principle", "未找到该原理"),

        // Shortcuts help
        "help_shortcuts" => ("Quick shortcuts:", "快捷键说明:"),
        "help_last" => ("'last' - reuse last problem", "'last' - 重用上次问题"),
        "help_example" => ("'example' - try example problem", "'example' - 尝试示例问题"),
        "help_back" => ("'back' - return to menu", "'back' - 返回菜单"),

        // Analysis flow
        "analysis_title" => ("🎯 Quick Problem Analysis", "🎯 快速问题分析"),
        "analysis_tips" => (
            "Tips: Type 'help' for shortcuts, 'back' to return",
            "提示: 输入'help'查看快捷键, 'back'返回",
        ),
        "analysis_auto_detect" => ("⚡ Auto-detecting parameters...", "⚡ 自动检测参数中..."),
        "analysis_reusing" => ("Reusing", "重用"),
        "analysis_example" => ("Example", "示例"),
        "detected_params" => ("Detected parameters", "检测到参数"),
        "improving_label" => ("Improving", "改善参数"),
        "worsening_label" => ("Worsening", "恶化参数"),

        // Solutions
        "solutions_title" => ("Solutions", "解决方案"),
        "solutions_analysis" => ("Analysis Results", "分析结果"),
        "solutions_brainstorm" => ("Brainstorm Results", "头脑风暴结果"),
        "solutions_none" => ("💭 No solutions found", "💭 未找到解决方案"),
        "solutions_count" => ("solutions", "个解决方案"),

        // Loading messages
        "loading_analyzing" => ("Analyzing with AI and TRIZ matrix", "基于AI和TRIZ矩阵分析中"),
        "loading_brainstorm" => ("Generating creative solutions", "生成创意解决方案中"),
        "loading_export" => ("Generating export file", "生成导出文件中"),

        // Export menu
        "export_menu_title" => ("📊 Quick Export", "📊 快速导出"),
        "export_success" => ("✅ Exported to file", "✅ 已导出到文件"),
        "export_failed" => ("❌ Export failed", "❌ 导出失败"),
        "export_no_solutions" => (
            "❌ No solutions available for export",
            "❌ 没有可导出的解决方案",
        ),

        // Text report labels
        "export_title" => ("TRIZ Innovation Solutions Report", "TRIZ创新解决方案报告"),
        "export_generated" => ("Generation time:", "生成时间:"),
        "export_count" => ("Number of solutions:", "解决方案数量:"),
        "export_solution" => ("Solution", "方案"),
        "export_description" => ("Description:", "描述:"),
        "export_confidence" => ("Confidence:", "置信度:"),
        "export_relevance" => ("Relevance:", "相关性:"),
        "export_examples" => ("Examples:", "示例:"),

        // More menu
        "more_title" => ("🔧 More Options", "🔧 更多选项"),
        "more_favorites" => ("⭐ Favorites", "⭐ 收藏夹"),
        "more_history" => ("📈 History", "📈 历史记录"),
        "more_settings" => ("⚙️ Settings", "⚙️ 系统设置"),
        "more_statistics" => ("📋 Statistics", "📋 使用统计"),
        "more_back" => ("⬅️ Back", "⬅️ 返回"),

        // Favorites
        "favorites_title" => ("⭐ Favorite Principles", "⭐ 收藏的原理"),
        "favorites_empty" => ("📝 Favorites is empty", "📝 收藏夹为空"),
        "favorites_total" => ("Total", "共"),

        // History
        "history_title" => ("📈 Recent Analysis Records", "📈 最近的分析记录"),
        "history_empty" => ("📝 No history records available", "📝 暂无历史记录"),
        "history_solutions" => ("Solutions", "方案数"),
        "history_rating" => ("Rating", "评分"),
        "history_not_rated" => ("Not rated", "未评分"),

        // Settings
        "settings_title" => ("⚙️ System Settings", "⚙️ 系统设置"),
        "settings_current" => ("Current configuration", "当前配置"),
        "settings_max_solutions" => ("Max solutions", "最大方案数"),
        "settings_history" => ("History", "历史记录"),
        "settings_language" => ("Language", "语言"),
        "settings_enabled" => ("on", "开启"),
        "settings_disabled" => ("off", "关闭"),
        "settings_modify_max" => ("Modify max solutions", "修改最大解决方案数"),
        "settings_toggle_history" => ("Toggle history", "切换历史记录"),
        "settings_return" => ("Return", "返回"),
        "settings_choose" => ("Choose option", "选择操作"),
        "settings_enter_max" => ("Enter max solutions (1-10)", "输入最大解决方案数 (1-10)"),
        "settings_saved" => ("✅ Settings saved", "✅ 设置已保存"),
        "settings_out_of_range" => ("❌ Value out of range", "❌ 数值范围错误"),
        "settings_format_error" => ("❌ Input format error", "❌ 输入格式错误"),
        "settings_history_on" => ("✅ History enabled", "✅ 历史记录已启用"),
        "settings_history_off" => ("✅ History disabled", "✅ 历史记录已禁用"),

        // Statistics
        "stats_title" => ("📋 Usage Statistics", "📋 使用统计"),
        "stats_total_sessions" => ("Total sessions", "总分析次数"),
        "stats_rated_sessions" => ("Rated sessions", "已评分次数"),
        "stats_average_rating" => ("Average rating", "平均评分"),
        "stats_favorites" => ("Favorite principles", "收藏原理数"),

        // Search
        "search_title" => ("🔍 Search Results", "🔍 搜索结果"),
        "search_empty" => ("No matching principles", "未找到匹配的原理"),

        // Rating
        "rate_saved" => ("✅ Rating saved", "✅ 评分已保存"),
        "rate_failed" => (
            "❌ Session not found or rating out of range (1-5)",
            "❌ 未找到该会话或评分超出范围 (1-5)",
        ),

        // AI enhancement
        "ai_extracting" => ("🤖 Asking the model to extract parameters...", "🤖 正在请求模型提取参数..."),
        "ai_enhanced" => ("🤖 Top solution reworded by AI", "🤖 首选方案已由AI润色"),
        "ai_unavailable" => (
            "OPENROUTER_API_KEY not set; continuing without AI enhancement",
            "未设置OPENROUTER_API_KEY，跳过AI增强",
        ),

        // API
        "api_empty_problem" => ("Problem description must not be empty", "问题描述不能为空"),
        "api_empty_principle" => ("Principle name must not be empty", "原理名称不能为空"),
        "api_unknown_route" => ("Not found", "接口不存在"),

        _ => return key,
    };
    match lang {
        Language::En => en,
        Language::Zh => zh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve_per_language() {
        assert_eq!(tr(Language::En, "export_title"), "TRIZ Innovation Solutions Report");
        assert_eq!(tr(Language::Zh, "export_title"), "TRIZ创新解决方案报告");
        assert_eq!(tr(Language::Zh, "api_empty_problem"), "问题描述不能为空");
    }

    #[test]
    fn language_menu_entry_names_the_other_language() {
        assert_eq!(tr(Language::En, "menu_language"), "🌐 中文");
        assert_eq!(tr(Language::Zh, "menu_language"), "🌐 English");
    }

    #[test]
    fn unknown_keys_come_back_verbatim() {
        assert_eq!(tr(Language::En, "no_such_key"), "no_such_key");
        assert_eq!(tr(Language::Zh, "no_such_key"), "no_such_key");
    }
}
