//! Default site content and per-entity placeholders
//!
//! The default document is the conference content the site ships with; the
//! normalizer falls back to it whenever a stored field is missing or unusable.
//! The `empty_*` constructors are the field-level placeholders used when a
//! single element inside a provided collection is blank.

use crate::domain::content::{
    ContactSection, PricingOption, ProgramDay, ProgramSession, RegistrationNotifications,
    SiteContent, Speaker,
};

pub fn empty_session() -> ProgramSession {
    ProgramSession {
        time: "00:00 - 00:00".to_string(),
        kind: "Тип сессии".to_string(),
        title: "Название сессии".to_string(),
        description: "Описание сессии".to_string(),
    }
}

pub fn empty_day() -> ProgramDay {
    ProgramDay { date: "Новый день".to_string(), sessions: vec![empty_session()] }
}

pub fn empty_speaker() -> Speaker {
    Speaker {
        name: "Имя спикера".to_string(),
        role: "Роль".to_string(),
        experience: "Опыт".to_string(),
        description: "Описание спикера".to_string(),
        tags: vec!["Новый тег".to_string()],
        photo_url: String::new(),
    }
}

pub fn empty_pricing() -> PricingOption {
    PricingOption {
        label: None,
        period: "Новый период".to_string(),
        price: "0₽".to_string(),
        features: vec!["Новое преимущество".to_string()],
        highlight: false,
    }
}

fn session(time: &str, kind: &str, title: &str, description: &str) -> ProgramSession {
    ProgramSession {
        time: time.to_string(),
        kind: kind.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn speaker(name: &str, role: &str, experience: &str, description: &str, tags: &[&str]) -> Speaker {
    Speaker {
        name: name.to_string(),
        role: role.to_string(),
        experience: experience.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        photo_url: String::new(),
    }
}

const PRICING_FEATURES: [&str; 4] = [
    "Доступ ко всем сессиям",
    "Материалы конференции",
    "Сертификат участника",
    "Запись всех выступлений",
];

fn pricing(label: Option<&str>, period: &str, price: &str, highlight: bool) -> PricingOption {
    PricingOption {
        label: label.map(|l| l.to_string()),
        period: period.to_string(),
        price: price.to_string(),
        features: PRICING_FEATURES.iter().map(|f| f.to_string()).collect(),
        highlight,
    }
}

/// Build the complete default document. Pure and cheap enough to construct
/// on every normalization pass.
pub fn default_content() -> SiteContent {
    SiteContent {
        program_days: vec![
            ProgramDay {
                date: "24 ноября".to_string(),
                sessions: vec![
                    session(
                        "10:00\u{a0}-\u{a0}11:30",
                        "Пленарная сессия",
                        "Основы гештальт-терапии в современном контексте",
                        "Основной доклад",
                    ),
                    session(
                        "11:45 - 13:15",
                        "Семинар",
                        "Работа с травмой через призму гештальт-подхода",
                        "Практический семинар",
                    ),
                    session("13:15 - 14:00", "Дискуссия", "Обсуждения и QA", "Интерактивная сессия"),
                ],
            },
            ProgramDay {
                date: "25 ноября".to_string(),
                sessions: vec![
                    session(
                        "10:00\u{a0}-\u{a0}11:30",
                        "Пленарная сессия",
                        "Контакт и поддержка в онлайн-терапии",
                        "Методологический доклад",
                    ),
                    session(
                        "11:45 - 13:15",
                        "Мастер-класс",
                        "Полевые процессы в групповой работе",
                        "Групповой опыт",
                    ),
                    session(
                        "13:15 - 14:00",
                        "Супервизия",
                        "Супервизорские группы: обмен опытом",
                        "Интерактивная сессия",
                    ),
                ],
            },
            ProgramDay {
                date: "26 ноября".to_string(),
                sessions: vec![
                    session(
                        "10:00\u{a0}-\u{a0}11:30",
                        "Пленарная сессия",
                        "Контакт и поддержка в онлайн-терапии",
                        "Методологический доклад",
                    ),
                    session(
                        "11:45 - 13:15",
                        "Мастер-класс",
                        "Полевые процессы в групповой работе",
                        "Групповой опыт",
                    ),
                    session(
                        "13:15 - 14:00",
                        "Супервизия",
                        "Супервизорские группы: обмен опытом",
                        "Интерактивная сессия",
                    ),
                ],
            },
        ],
        speakers: vec![
            speaker(
                "Анна Петрова",
                "Ведущий гештальт-терапевт",
                "15+ лет практики",
                "Специалист по работе с терапевтическим опытом. Автор публикаций по современным подходам в гештальт-терапии.",
                &["Контакт", "Поддержка", "Травма и восстановление"],
            ),
            speaker(
                "Михаил Иванов",
                "Супервизор, тренер",
                "20+ лет практики",
                "Эксперт в области групповых процессов и полевых феноменов. Ведущий программ подготовки терапевтов.",
                &["Супервизия", "Обучение", "Групповая терапия"],
            ),
            speaker(
                "Дмитрий Козлов",
                "Философ, терапевт",
                "18 лет практики",
                "Специалист по работе с травматическим опытом. Автор публикаций по современным подходам в гештальт-терапии.",
                &["Философия", "Современность", "Этика терапии"],
            ),
            speaker(
                "Елена Смирнова",
                "Клинический психолог",
                "12 лет практики",
                "Пионер в области онлайн гештальт-терапии. Исследователь цифровых особенностей контакта в цифровом пространстве.",
                &["Контакт", "Онлайн-практика", "Интеграция"],
            ),
        ],
        pricing_options: vec![
            pricing(Some("Лучшая цена"), "До 20 октября", "6 000₽", true),
            pricing(None, "С 20 октября", "7 000₽", false),
            pricing(None, "С 17 ноября и в день начала", "8 000₽", false),
        ],
        registration_notifications: RegistrationNotifications {
            title: "Автоматические уведомления:".to_string(),
            items: vec![
                "Подтверждение регистрации приходит сразу после заполнения формы.".to_string(),
                "Подтверждение оплаты и ссылка на Zoom — после поступления оплаты.".to_string(),
                "Напоминание и ссылка — за день до начала конференции.".to_string(),
            ],
        },
        contact_section: ContactSection {
            title: "Контакты организаторов".to_string(),
            phone: "+7 495 123-45-67".to_string(),
            email: "info@gestalt.ru".to_string(),
            website: "https://gestalt.ru".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_satisfies_invariants() {
        let content = default_content();
        assert!(!content.program_days.is_empty());
        for day in &content.program_days {
            assert!(!day.sessions.is_empty());
        }
        for speaker in &content.speakers {
            assert!(!speaker.tags.is_empty());
        }
        for option in &content.pricing_options {
            assert!(!option.features.is_empty());
        }
        assert!(!content.registration_notifications.items.is_empty());
    }

    #[test]
    fn test_defaults_carry_no_surrounding_whitespace() {
        // The normalizer trims every string field, so defaults must already
        // be trimmed or normalization would not be idempotent.
        let content = default_content();
        for day in &content.program_days {
            assert_eq!(day.date, day.date.trim());
            for s in &day.sessions {
                assert_eq!(s.time, s.time.trim());
                assert_eq!(s.title, s.title.trim());
            }
        }
        for sp in &content.speakers {
            assert_eq!(sp.name, sp.name.trim());
            assert_eq!(sp.description, sp.description.trim());
        }
    }

    #[test]
    fn test_empty_constructors_are_non_empty() {
        assert_eq!(empty_day().sessions.len(), 1);
        assert_eq!(empty_speaker().tags.len(), 1);
        assert_eq!(empty_pricing().features.len(), 1);
        assert!(empty_pricing().label.is_none());
        assert!(!empty_pricing().highlight);
    }
}
