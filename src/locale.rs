// src/locale.rs

//! Localization for panel rendering and notifications.
//!
//! Holds the per-language string tables and the best-effort rewrite of
//! backend-emitted messages into localized equivalents. Lookups never
//! fail: a missing key resolves to the key itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

impl FromStr for Lang {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(Lang::Ru),
            "en" => Ok(Lang::En),
            other => Err(AppError::config(format!("unknown language: {other}"))),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolver for the active language's string table.
#[derive(Debug, Clone, Copy)]
pub struct Localizer {
    lang: Lang,
}

impl Localizer {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Resolve a dotted key to the localized string.
    ///
    /// Missing keys fall back to the key itself so rendering never aborts
    /// on an incomplete table.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.lang {
            Lang::Ru => RU,
            Lang::En => EN,
        };
        table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }

    /// Rewrite a backend-emitted message into a localized string.
    ///
    /// The backend emits Russian prose; a static substring table maps the
    /// known phrases to translation keys. First matching substring wins.
    /// For the Russian UI the original message is kept verbatim, for any
    /// other language the mapped translation replaces it. Unmatched
    /// messages pass through unchanged. Pure function of its inputs.
    pub fn rewrite_backend_message(&self, message: &str) -> String {
        if message.is_empty() {
            return message.to_string();
        }
        for (pattern, key) in BACKEND_MESSAGE_MAP {
            if message.contains(pattern) {
                return match self.lang {
                    Lang::Ru => message.to_string(),
                    _ => self.t(key).to_string(),
                };
            }
        }
        message.to_string()
    }

    /// Human-readable interval, e.g. `90 -> "1h 30m"` / `"1ч 30м"`.
    pub fn format_interval(&self, minutes: u32) -> String {
        match self.lang {
            Lang::En => {
                if minutes < 60 {
                    format!("{minutes} min")
                } else if minutes == 60 {
                    "1 hour".to_string()
                } else {
                    let hours = minutes / 60;
                    let rem = minutes % 60;
                    if rem > 0 {
                        format!("{hours}h {rem}m")
                    } else {
                        format!("{hours} hours")
                    }
                }
            }
            Lang::Ru => {
                if minutes < 60 {
                    format!("{minutes} мин")
                } else if minutes == 60 {
                    "1 час".to_string()
                } else {
                    let hours = minutes / 60;
                    let rem = minutes % 60;
                    if rem > 0 {
                        format!("{hours}ч {rem}м")
                    } else {
                        format!("{hours}ч")
                    }
                }
            }
        }
    }

    /// Short localized weekday name, Monday-based index 0-6.
    pub fn day_name(&self, day: u8) -> &'static str {
        const KEYS: [&str; 7] = [
            "schedule.days.mon",
            "schedule.days.tue",
            "schedule.days.wed",
            "schedule.days.thu",
            "schedule.days.fri",
            "schedule.days.sat",
            "schedule.days.sun",
        ];
        match KEYS.get(day as usize) {
            Some(key) => self.t(key),
            None => "?",
        }
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Lang::default())
    }
}

/// Substitute `{name}` placeholders in a localized template.
pub fn fill(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in pairs {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Render the Telegram formatting subset (`<b> <i> <code> <a>`) of a post
/// body as plain display text. Unknown markup is left as-is; newlines are
/// preserved.
pub fn format_telegram_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    static LINK: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let link = LINK.get_or_init(|| {
        regex::Regex::new(r#"<a href="([^"]+)">(.*?)</a>"#).expect("static regex")
    });

    let mut out = text.to_string();
    for (open, close) in [("<b>", "</b>"), ("<i>", "</i>"), ("<code>", "</code>")] {
        out = out.replace(open, "").replace(close, "");
    }
    // <a href="url">label</a> -> label (url)
    link.replace_all(&out, "$2 ($1)").into_owned()
}

/// Known backend message substrings mapped to translation keys.
/// Ordered; the first matching substring wins.
const BACKEND_MESSAGE_MAP: &[(&str, &str)] = &[
    ("Группа добавлена", "toast.groupAdded"),
    ("Чат удален", "toast.groupDeleted"),
    ("Интервал установлен", "toast.intervalSet"),
    ("Публикация запущена", "toast.publicationStarted"),
    ("Планировщик запущен", "toast.schedulerStarted"),
    ("Планировщик остановлен", "toast.schedulerStopped"),
    ("Пост перезагружен", "toast.postReloaded"),
    ("Статус публикации сброшен", "toast.statusReset"),
    ("Не указан идентификатор группы", "toast.groupNotSpecified"),
    ("Не удалось найти чат", "toast.groupNotFound"),
    ("Чат уже добавлен или произошла ошибка", "toast.groupAlreadyAdded"),
    ("Чат не найден или произошла ошибка", "toast.groupNotFound"),
    ("Не указан интервал", "toast.intervalNotSpecified"),
    ("Неверный интервал", "toast.invalidInterval"),
    (
        "Максимальный интервал: 10080 минут (7 дней)",
        "toast.maxIntervalError",
    ),
    ("Ошибка установки интервала", "toast.errorSetInterval"),
    ("Планировщик не инициализирован", "toast.schedulerNotInitialized"),
    (
        "Обработчик постов не инициализирован",
        "toast.postHandlerNotInitialized",
    ),
];

const RU: &[(&str, &str)] = &[
    ("app.title", "Система публикации постов"),
    ("connection.connected", "Подключен"),
    ("connection.disconnected", "Отключен"),
    ("status.groups", "Группы"),
    ("status.interval", "Интервал"),
    ("status.scheduler", "Планировщик"),
    ("status.nextPublication", "Следующая публикация"),
    ("status.publication", "Статус публикации"),
    ("status.running", "Запущен"),
    ("status.stopped", "Остановлен"),
    ("status.notActive", "Неактивно"),
    ("status.publishing", "Публикация"),
    ("status.waiting", "Ожидание"),
    ("status.unknown", "Неизвестно"),
    ("publication.details", "Детальный статус публикации"),
    ("publication.currentStep", "Текущий этап:"),
    ("publication.progress", "Прогресс:"),
    ("publication.startTime", "Время начала:"),
    ("publication.lastUpdate", "Последнее обновление:"),
    ("publication.errors", "Ошибки:"),
    ("publication.completed", "Завершено"),
    ("publication.cancelled", "Прервано"),
    ("publication.completedSuccess", "Публикация завершена успешно!"),
    ("publication.completedWithErrors", "Публикация завершена с ошибками"),
    ("publication.criticalError", "Критическая ошибка"),
    ("publication.initialization", "Инициализация"),
    ("publication.gettingGroups", "Получение списка групп..."),
    ("publication.publishing", "Публикация в {total} групп"),
    ("publication.waiting", "Ожидание {seconds} секунд..."),
    ("groups.add", "Добавить группу/канал"),
    ("groups.empty", "Нет добавленных групп"),
    ("groups.emptyDesc", "Добавьте группу или канал для начала работы"),
    ("groups.loading", "Загрузка групп..."),
    ("groups.lastPost", "Последняя публикация:"),
    ("groups.active", "Активна"),
    ("groups.disabled", "Отключена"),
    ("groups.noTitle", "Без названия"),
    ("groups.never", "Никогда"),
    ("toast.notification", "Уведомление"),
    ("toast.enterGroup", "Введите ссылку, @username или ID группы"),
    ("toast.maxInterval", "Максимальный интервал: 10080 минут (7 дней)"),
    ("toast.invalidInterval", "Неверный интервал"),
    ("toast.errorPublishing", "Ошибка публикации"),
    ("toast.errorStartScheduler", "Ошибка запуска планировщика"),
    ("toast.errorStopScheduler", "Ошибка остановки планировщика"),
    ("toast.errorReloadPost", "Ошибка перезагрузки поста"),
    ("toast.errorAddGroup", "Ошибка добавления группы"),
    ("toast.errorToggleGroup", "Ошибка изменения статуса группы"),
    ("toast.errorSetInterval", "Ошибка установки интервала"),
    (
        "toast.groupNotFound",
        "Не удалось найти чат. Проверьте, что чат существует и ваша учетная запись имеет к нему доступ.",
    ),
    ("toast.groupNotSpecified", "Не указан идентификатор группы"),
    ("toast.groupAlreadyAdded", "Чат уже добавлен или произошла ошибка"),
    ("toast.groupDeleted", "Группа удалена"),
    ("toast.groupAdded", "Группа добавлена"),
    ("toast.intervalNotSpecified", "Не указан интервал"),
    ("toast.maxIntervalError", "Максимальный интервал: 10080 минут (7 дней)"),
    ("toast.intervalSet", "Интервал установлен"),
    ("toast.publicationStarted", "Публикация запущена"),
    ("toast.schedulerStarted", "Планировщик запущен"),
    ("toast.schedulerStopped", "Планировщик остановлен"),
    ("toast.schedulerNotInitialized", "Планировщик не инициализирован"),
    (
        "toast.postHandlerNotInitialized",
        "Обработчик постов не инициализирован",
    ),
    ("toast.postReloaded", "Пост перезагружен"),
    ("toast.statusReset", "Статус публикации сброшен"),
    ("history.title", "История публикаций"),
    ("history.loading", "Загрузка..."),
    ("history.empty", "История пуста"),
    ("history.table.time", "Время"),
    ("history.table.group", "Группа"),
    ("history.table.status", "Статус"),
    ("history.table.retries", "Попытки"),
    ("history.table.error", "Ошибка"),
    ("history.prev", "Назад"),
    ("history.next", "Вперед"),
    ("history.firstPage", "Это первая страница"),
    ("history.lastPage", "Это последняя страница"),
    ("history.clear", "Очистить историю"),
    ("history.status.success", "Успешно"),
    ("history.status.error", "Ошибка"),
    ("statistics.title", "Статистика публикаций"),
    ("statistics.total", "Всего публикаций"),
    ("statistics.successful", "Успешных"),
    ("statistics.failed", "Неудачных"),
    ("statistics.successRate", "Процент успеха"),
    ("statistics.topGroups", "Топ групп"),
    ("statistics.dailyActivity", "Активность по дням"),
    ("statistics.hourlyActivity", "Активность по часам"),
    ("statistics.publications", "Публикации"),
    ("statistics.noData", "Нет данных"),
    ("templates.title", "Шаблоны постов"),
    ("templates.loading", "Загрузка..."),
    ("templates.empty", "Нет шаблонов"),
    ("templates.table.name", "Название"),
    ("templates.table.content", "Содержимое"),
    ("templates.table.status", "Статус"),
    ("templates.status.active", "Активен"),
    ("templates.status.inactive", "Неактивен"),
    ("templates.required", "Название и содержимое обязательны"),
    ("preview.loading", "Загрузка..."),
    ("preview.info", "Длина текста:"),
    ("preview.chars", "символов"),
    ("preview.usingTemplate", "Используется шаблон:"),
    ("schedule.title", "Расписание публикаций"),
    ("schedule.loading", "Загрузка..."),
    ("schedule.empty", "Нет расписаний"),
    ("schedule.active", "Активно"),
    ("schedule.inactive", "Неактивно"),
    ("schedule.minutes", "минут"),
    ("schedule.table.type", "Тип"),
    ("schedule.table.details", "Детали"),
    ("schedule.table.status", "Статус"),
    ("schedule.table.created", "Создано"),
    ("schedule.types.interval", "Интервал"),
    ("schedule.types.time", "Конкретное время"),
    ("schedule.types.days", "Дни недели"),
    ("schedule.types.hours", "Часовое окно"),
    ("schedule.days.mon", "Пн"),
    ("schedule.days.tue", "Вт"),
    ("schedule.days.wed", "Ср"),
    ("schedule.days.thu", "Чт"),
    ("schedule.days.fri", "Пт"),
    ("schedule.days.sat", "Сб"),
    ("schedule.days.sun", "Вс"),
    ("schedule.errors.invalidInterval", "Неверный интервал"),
    ("schedule.errors.invalidTime", "Неверное время"),
    ("schedule.errors.noDays", "Выберите хотя бы один день недели"),
    ("schedule.errors.invalidHours", "Неверное часовое окно"),
    ("error.unknown", "Неизвестная ошибка"),
    ("error.unknownGroup", "Неизвестно"),
    ("error.loadFailed", "Ошибка загрузки данных"),
    ("loading", "Загрузка..."),
];

const EN: &[(&str, &str)] = &[
    ("app.title", "Post Publishing System"),
    ("connection.connected", "Connected"),
    ("connection.disconnected", "Disconnected"),
    ("status.groups", "Groups"),
    ("status.interval", "Interval"),
    ("status.scheduler", "Scheduler"),
    ("status.nextPublication", "Next Publication"),
    ("status.publication", "Publication Status"),
    ("status.running", "Running"),
    ("status.stopped", "Stopped"),
    ("status.notActive", "Not Active"),
    ("status.publishing", "Publishing"),
    ("status.waiting", "Waiting"),
    ("status.unknown", "Unknown"),
    ("publication.details", "Detailed Publication Status"),
    ("publication.currentStep", "Current Step:"),
    ("publication.progress", "Progress:"),
    ("publication.startTime", "Start Time:"),
    ("publication.lastUpdate", "Last Update:"),
    ("publication.errors", "Errors:"),
    ("publication.completed", "Completed"),
    ("publication.cancelled", "Cancelled"),
    ("publication.completedSuccess", "Publication completed successfully!"),
    ("publication.completedWithErrors", "Publication completed with errors"),
    ("publication.criticalError", "Critical error"),
    ("publication.initialization", "Initialization"),
    ("publication.gettingGroups", "Getting groups list..."),
    ("publication.publishing", "Publishing to {total} groups"),
    ("publication.waiting", "Waiting {seconds} seconds..."),
    ("groups.add", "Add Group/Channel"),
    ("groups.empty", "No groups added"),
    ("groups.emptyDesc", "Add a group or channel to get started"),
    ("groups.loading", "Loading groups..."),
    ("groups.lastPost", "Last publication:"),
    ("groups.active", "Active"),
    ("groups.disabled", "Disabled"),
    ("groups.noTitle", "No title"),
    ("groups.never", "Never"),
    ("toast.notification", "Notification"),
    ("toast.enterGroup", "Enter link, @username or group ID"),
    ("toast.maxInterval", "Maximum interval: 10080 minutes (7 days)"),
    ("toast.invalidInterval", "Invalid interval"),
    ("toast.errorPublishing", "Publishing error"),
    ("toast.errorStartScheduler", "Error starting scheduler"),
    ("toast.errorStopScheduler", "Error stopping scheduler"),
    ("toast.errorReloadPost", "Error reloading post"),
    ("toast.errorAddGroup", "Error adding group"),
    ("toast.errorToggleGroup", "Error changing group status"),
    ("toast.errorSetInterval", "Error setting interval"),
    (
        "toast.groupNotFound",
        "Could not find chat. Make sure the chat exists and your account has access to it.",
    ),
    ("toast.groupNotSpecified", "Group identifier not specified"),
    ("toast.groupAlreadyAdded", "Chat already added or an error occurred"),
    ("toast.groupDeleted", "Group deleted"),
    ("toast.groupAdded", "Group added"),
    ("toast.intervalNotSpecified", "Interval not specified"),
    ("toast.maxIntervalError", "Maximum interval: 10080 minutes (7 days)"),
    ("toast.intervalSet", "Interval set"),
    ("toast.publicationStarted", "Publication started"),
    ("toast.schedulerStarted", "Scheduler started"),
    ("toast.schedulerStopped", "Scheduler stopped"),
    ("toast.schedulerNotInitialized", "Scheduler not initialized"),
    ("toast.postHandlerNotInitialized", "Post handler not initialized"),
    ("toast.postReloaded", "Post reloaded"),
    ("toast.statusReset", "Publication status reset"),
    ("history.title", "Publication History"),
    ("history.loading", "Loading..."),
    ("history.empty", "History is empty"),
    ("history.table.time", "Time"),
    ("history.table.group", "Group"),
    ("history.table.status", "Status"),
    ("history.table.retries", "Retries"),
    ("history.table.error", "Error"),
    ("history.prev", "Previous"),
    ("history.next", "Next"),
    ("history.firstPage", "This is the first page"),
    ("history.lastPage", "This is the last page"),
    ("history.clear", "Clear History"),
    ("history.status.success", "Success"),
    ("history.status.error", "Error"),
    ("statistics.title", "Publication Statistics"),
    ("statistics.total", "Total Publications"),
    ("statistics.successful", "Successful"),
    ("statistics.failed", "Failed"),
    ("statistics.successRate", "Success Rate"),
    ("statistics.topGroups", "Top Groups"),
    ("statistics.dailyActivity", "Daily Activity"),
    ("statistics.hourlyActivity", "Hourly Activity"),
    ("statistics.publications", "Publications"),
    ("statistics.noData", "No data"),
    ("templates.title", "Post Templates"),
    ("templates.loading", "Loading..."),
    ("templates.empty", "No templates"),
    ("templates.table.name", "Name"),
    ("templates.table.content", "Content"),
    ("templates.table.status", "Status"),
    ("templates.status.active", "Active"),
    ("templates.status.inactive", "Inactive"),
    ("templates.required", "Name and content are required"),
    ("preview.loading", "Loading..."),
    ("preview.info", "Text length:"),
    ("preview.chars", "characters"),
    ("preview.usingTemplate", "Using template:"),
    ("schedule.title", "Publication Schedule"),
    ("schedule.loading", "Loading..."),
    ("schedule.empty", "No schedules"),
    ("schedule.active", "Active"),
    ("schedule.inactive", "Inactive"),
    ("schedule.minutes", "minutes"),
    ("schedule.table.type", "Type"),
    ("schedule.table.details", "Details"),
    ("schedule.table.status", "Status"),
    ("schedule.table.created", "Created"),
    ("schedule.types.interval", "Interval"),
    ("schedule.types.time", "Specific Time"),
    ("schedule.types.days", "Days of Week"),
    ("schedule.types.hours", "Time Window"),
    ("schedule.days.mon", "Mon"),
    ("schedule.days.tue", "Tue"),
    ("schedule.days.wed", "Wed"),
    ("schedule.days.thu", "Thu"),
    ("schedule.days.fri", "Fri"),
    ("schedule.days.sat", "Sat"),
    ("schedule.days.sun", "Sun"),
    ("schedule.errors.invalidInterval", "Invalid interval"),
    ("schedule.errors.invalidTime", "Invalid time"),
    ("schedule.errors.noDays", "Select at least one day of week"),
    ("schedule.errors.invalidHours", "Invalid time window"),
    ("error.unknown", "Unknown error"),
    ("error.unknownGroup", "Unknown"),
    ("error.loadFailed", "Failed to load data"),
    ("loading", "Loading..."),
];
