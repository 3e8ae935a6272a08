//! Localized display strings.

use crate::models::Language;

/// Display strings for one language.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    /// Banner when the target is already among the results.
    pub duplicate: &'static str,
    /// Banner when the gateway fails without a message.
    pub failed: &'static str,
    /// Loading indicator.
    pub scanning: &'static str,
    /// Shown when there are no results yet.
    pub ready: &'static str,
    /// Heading of the results list.
    pub results: &'static str,
    /// Heading of the comparison section.
    pub comparison: &'static str,
    /// Heading of the history list.
    pub recent_searches: &'static str,
    /// Heading of the score chart.
    pub market_strength: &'static str,
    /// Note under the score chart.
    pub normalized_note: &'static str,
    /// Heading of the downloads chart.
    pub app_performance: &'static str,
    /// Heading of the detail table.
    pub detailed_metrics: &'static str,
    /// Column: app name.
    pub col_name: &'static str,
    /// Column: downloads.
    pub col_downloads: &'static str,
    /// Column: revenue.
    pub col_revenue: &'static str,
    /// Column: regions.
    pub col_regions: &'static str,
    /// Column: demographics.
    pub col_demographics: &'static str,
    /// Site mode label.
    pub site_mode: &'static str,
    /// App mode label.
    pub app_mode: &'static str,
    /// Positive China availability.
    pub serves_china: &'static str,
    /// Negative China availability.
    pub no_china: &'static str,
    /// Positive China registration.
    pub china_auth: &'static str,
    /// Negative China registration.
    pub no_china_auth: &'static str,
    /// Board members heading.
    pub board: &'static str,
    /// Positive stablecoin support.
    pub stablecoin: &'static str,
    /// Negative stablecoin support.
    pub no_stablecoin: &'static str,
    /// Fallback when no crypto payment was found.
    pub no_crypto_found: &'static str,
    /// Sources heading.
    pub sources: &'static str,
    /// Shown when the comparison needs more results.
    pub compare_needs_more: &'static str,
    /// Shown when no query has been made yet.
    pub no_history: &'static str,
    /// Card label: topics.
    pub topics: &'static str,
    /// Card label: audience.
    pub audience: &'static str,
    /// Card label: sentiment score.
    pub sentiment: &'static str,
    /// Card label: SEO score.
    pub seo: &'static str,
    /// Card label: traffic tier.
    pub traffic: &'static str,
    /// Card label: content frequency.
    pub frequency: &'static str,
    /// Card label: tech stack.
    pub tech_stack: &'static str,
    /// Card label: tags.
    pub tags: &'static str,
    /// Card label: social links.
    pub social: &'static str,
    /// Card label: contacts.
    pub contact: &'static str,
    /// Card label: platform.
    pub platform: &'static str,
    /// Card label: developer.
    pub developer: &'static str,
    /// Card label: category.
    pub category: &'static str,
    /// Card label: rating.
    pub rating: &'static str,
    /// Card label: price.
    pub price: &'static str,
    /// Card label: last update.
    pub last_updated: &'static str,
}

const EN: Messages = Messages {
    duplicate: "This input has already been analyzed.",
    failed: "Failed to analyze. Check the input and try again.",
    scanning: "Scanning...",
    ready: "Ready to crawl. Select a mode and enter a target to start gathering intelligence.",
    results: "Analysis Results",
    comparison: "Comparative Analysis",
    recent_searches: "Recent Searches",
    market_strength: "Market Strength Comparison",
    normalized_note: "Note: Apps are normalized to 0-100 scale",
    app_performance: "App Performance & Downloads",
    detailed_metrics: "Detailed Metrics Comparison",
    col_name: "App Name",
    col_downloads: "Downloads",
    col_revenue: "Est. Revenue",
    col_regions: "Country/Region",
    col_demographics: "User Demographics",
    site_mode: "Website Analysis",
    app_mode: "App Store / Play",
    serves_china: "Serves Mainland China",
    no_china: "No Mainland China service detected",
    china_auth: "CN registration/login supported",
    no_china_auth: "CN registration/login not supported",
    board: "Board & Key Executives",
    stablecoin: "Stablecoin Payment",
    no_stablecoin: "No Stablecoin Payment",
    no_crypto_found: "No direct crypto payment methods identified.",
    sources: "Sources",
    compare_needs_more: "Comparison needs at least two results.",
    no_history: "No recent searches.",
    topics: "Topics",
    audience: "Audience",
    sentiment: "Sentiment",
    seo: "SEO",
    traffic: "Traffic",
    frequency: "Updates",
    tech_stack: "Tech Stack",
    tags: "Tags",
    social: "Social",
    contact: "Contact",
    platform: "Platform",
    developer: "Developer",
    category: "Category",
    rating: "Rating",
    price: "Price",
    last_updated: "Last Updated",
};

const ZH: Messages = Messages {
    duplicate: "该输入已被分析。",
    failed: "分析失败，请检查输入并重试。",
    scanning: "扫描中...",
    ready: "准备就绪。选择模式并输入目标以开始收集情报。",
    results: "分析结果",
    comparison: "对比分析",
    recent_searches: "最近搜索记录",
    market_strength: "市场竞争力对比",
    normalized_note: "注：应用评分已归一化为 0-100",
    app_performance: "应用表现与下载量",
    detailed_metrics: "详细指标对比",
    col_name: "应用名称",
    col_downloads: "下载量",
    col_revenue: "预估营收",
    col_regions: "国家地区",
    col_demographics: "用户画像/地区",
    site_mode: "网站分析",
    app_mode: "应用商店分析",
    serves_china: "服务中国大陆",
    no_china: "未检测到中国大陆服务",
    china_auth: "支持中国用户注册/登录",
    no_china_auth: "不支持中国用户注册/登录",
    board: "董事会与核心高管",
    stablecoin: "稳定币支付支持",
    no_stablecoin: "不支持稳定币支付",
    no_crypto_found: "未发现直接的加密货币支付方式。",
    sources: "来源",
    compare_needs_more: "对比至少需要两个结果。",
    no_history: "暂无搜索记录。",
    topics: "主题",
    audience: "目标受众",
    sentiment: "口碑",
    seo: "SEO",
    traffic: "流量",
    frequency: "更新频率",
    tech_stack: "技术栈",
    tags: "标签",
    social: "社交媒体",
    contact: "联系方式",
    platform: "平台",
    developer: "开发者",
    category: "类别",
    rating: "评分",
    price: "价格",
    last_updated: "最近更新",
};

impl Messages {
    /// Returns the strings for `language`.
    #[must_use]
    pub const fn for_language(language: Language) -> &'static Self {
        match language {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_differ() {
        let en = Messages::for_language(Language::En);
        let zh = Messages::for_language(Language::Zh);
        assert_ne!(en.duplicate, zh.duplicate);
        assert_ne!(en.failed, zh.failed);
    }
}
