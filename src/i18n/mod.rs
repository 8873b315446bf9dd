use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            _ => Err("language must be one of: en, zh".to_string()),
        }
    }

    /// Directive appended to every provider prompt.
    pub fn prompt_directive(self) -> &'static str {
        match self {
            Self::En => "Respond in English.",
            Self::Zh => "请用简体中文回应。",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    AppTitle,
    TitleHome,
    TitleItinerary,
    TitleDetail,
    TitleBooking,
    TitleFinal,
    BusyGenerating,
    BusyModifying,
    BusySearchingServices,
    ErrorHeading,
    ErrorRecoveryHint,
    LabelDestination,
    LabelDays,
    LabelBudget,
    LabelInterests,
    LabelLunch,
    LabelDinner,
    LabelTransport,
    LabelHotel,
    LabelGuides,
    LabelVehicles,
    LabelPerDay,
    LabelPerNight,
    LabelRating,
    LabelTotalCost,
    LabelBooked,
    LabelNothingBooked,
    MapNoLocatableActivities,
    StatusSnapshotSaved,
    StatusSnapshotFailed,
    HintHome,
    HintItinerary,
    HintDetail,
    HintBooking,
    HintFinal,
    HintModifyInput,
    BudgetEconomy,
    BudgetComfort,
    BudgetLuxury,
}

pub const ALL_TEXT_KEYS: [TextKey; 39] = [
    TextKey::AppTitle,
    TextKey::TitleHome,
    TextKey::TitleItinerary,
    TextKey::TitleDetail,
    TextKey::TitleBooking,
    TextKey::TitleFinal,
    TextKey::BusyGenerating,
    TextKey::BusyModifying,
    TextKey::BusySearchingServices,
    TextKey::ErrorHeading,
    TextKey::ErrorRecoveryHint,
    TextKey::LabelDestination,
    TextKey::LabelDays,
    TextKey::LabelBudget,
    TextKey::LabelInterests,
    TextKey::LabelLunch,
    TextKey::LabelDinner,
    TextKey::LabelTransport,
    TextKey::LabelHotel,
    TextKey::LabelGuides,
    TextKey::LabelVehicles,
    TextKey::LabelPerDay,
    TextKey::LabelPerNight,
    TextKey::LabelRating,
    TextKey::LabelTotalCost,
    TextKey::LabelBooked,
    TextKey::LabelNothingBooked,
    TextKey::MapNoLocatableActivities,
    TextKey::StatusSnapshotSaved,
    TextKey::StatusSnapshotFailed,
    TextKey::HintHome,
    TextKey::HintItinerary,
    TextKey::HintDetail,
    TextKey::HintBooking,
    TextKey::HintFinal,
    TextKey::HintModifyInput,
    TextKey::BudgetEconomy,
    TextKey::BudgetComfort,
    TextKey::BudgetLuxury,
];

impl TextKey {
    pub fn text(self, language: Language) -> &'static str {
        match language {
            Language::En => self.english(),
            Language::Zh => self.chinese(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::AppTitle => "TripSmith",
            Self::TitleHome => "Let's plan your trip",
            Self::TitleItinerary => "Your generated itinerary",
            Self::TitleDetail => "Day details",
            Self::TitleBooking => "Book services",
            Self::TitleFinal => "Your final itinerary",
            Self::BusyGenerating => "Tailoring your itinerary...",
            Self::BusyModifying => "Applying your changes...",
            Self::BusySearchingServices => "Finding available guides and vehicles...",
            Self::ErrorHeading => "Something went wrong",
            Self::ErrorRecoveryHint => "Enter/Esc dismiss",
            Self::LabelDestination => "Destination",
            Self::LabelDays => "Days",
            Self::LabelBudget => "Budget",
            Self::LabelInterests => "Interests",
            Self::LabelLunch => "Lunch",
            Self::LabelDinner => "Dinner",
            Self::LabelTransport => "Transport",
            Self::LabelHotel => "Hotel",
            Self::LabelGuides => "Guides",
            Self::LabelVehicles => "Vehicles",
            Self::LabelPerDay => "/day",
            Self::LabelPerNight => "/night",
            Self::LabelRating => "Rating",
            Self::LabelTotalCost => "Total service cost",
            Self::LabelBooked => "Booked",
            Self::LabelNothingBooked => "No services booked",
            Self::MapNoLocatableActivities => "No locatable activities for this day",
            Self::StatusSnapshotSaved => "Itinerary saved locally",
            Self::StatusSnapshotFailed => "Could not save itinerary",
            Self::HintHome => "Tab next field | Space toggle interest | Enter generate | Ctrl-C quit",
            Self::HintItinerary => "Up/Down select day | Enter open day | r regenerate | m modify | f finalize | Ctrl-R reset",
            Self::HintDetail => "b book services | Esc back | Ctrl-R reset",
            Self::HintBooking => "Up/Down move | Left/Right column | Enter book | f finalize",
            Self::HintFinal => "s save | Ctrl-R start over",
            Self::HintModifyInput => "Type your change request | Enter send | Esc cancel",
            Self::BudgetEconomy => "Economy",
            Self::BudgetComfort => "Comfort",
            Self::BudgetLuxury => "Luxury",
        }
    }

    fn chinese(self) -> &'static str {
        match self {
            Self::AppTitle => "AI 旅行规划师",
            Self::TitleHome => "让我们开始规划旅程",
            Self::TitleItinerary => "为您生成的行程",
            Self::TitleDetail => "当天详情",
            Self::TitleBooking => "预订服务",
            Self::TitleFinal => "您的最终行程单",
            Self::BusyGenerating => "正在为您量身定制行程...",
            Self::BusyModifying => "正在应用您的修改...",
            Self::BusySearchingServices => "正在寻找可用的导游和车辆...",
            Self::ErrorHeading => "出现问题",
            Self::ErrorRecoveryHint => "Enter/Esc 关闭",
            Self::LabelDestination => "目的地",
            Self::LabelDays => "天数",
            Self::LabelBudget => "预算",
            Self::LabelInterests => "兴趣",
            Self::LabelLunch => "午餐",
            Self::LabelDinner => "晚餐",
            Self::LabelTransport => "交通",
            Self::LabelHotel => "酒店",
            Self::LabelGuides => "导游",
            Self::LabelVehicles => "车辆",
            Self::LabelPerDay => "/天",
            Self::LabelPerNight => "/晚",
            Self::LabelRating => "星级",
            Self::LabelTotalCost => "服务总费用",
            Self::LabelBooked => "已预订",
            Self::LabelNothingBooked => "未预订任何服务",
            Self::MapNoLocatableActivities => "当天没有可定位的活动",
            Self::StatusSnapshotSaved => "行程已保存到本地",
            Self::StatusSnapshotFailed => "行程保存失败",
            Self::HintHome => "Tab 切换 | Space 选择兴趣 | Enter 生成 | Ctrl-C 退出",
            Self::HintItinerary => "上/下选择 | Enter 查看 | r 重新生成 | m 修改 | f 完成 | Ctrl-R 重置",
            Self::HintDetail => "b 预订服务 | Esc 返回 | Ctrl-R 重置",
            Self::HintBooking => "上/下移动 | 左/右切换 | Enter 预订 | f 完成",
            Self::HintFinal => "s 保存 | Ctrl-R 重新开始",
            Self::HintModifyInput => "输入修改要求 | Enter 发送 | Esc 取消",
            Self::BudgetEconomy => "经济",
            Self::BudgetComfort => "舒适",
            Self::BudgetLuxury => "豪华",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_in_both_languages() {
        for key in ALL_TEXT_KEYS {
            assert!(!key.text(Language::En).is_empty());
            assert!(!key.text(Language::Zh).is_empty());
        }
    }

    #[test]
    fn key_table_has_no_duplicates() {
        for (index, key) in ALL_TEXT_KEYS.iter().enumerate() {
            assert!(
                !ALL_TEXT_KEYS[..index].contains(key),
                "duplicate entry {key:?}"
            );
        }
    }

    #[test]
    fn language_parse_round_trips() {
        assert_eq!(Language::parse("en").unwrap(), Language::En);
        assert_eq!(Language::parse(" ZH ").unwrap(), Language::Zh);
        assert!(Language::parse("fr").is_err());
    }
}
