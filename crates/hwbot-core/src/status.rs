//! Turns a homework record into the chat message announcing its new status.

use serde_json::Value;

use crate::{domain::Verdict, errors::Error, Result};

/// Render `Изменился статус проверки работы "{name}". {verdict}` for a record.
pub fn render_message(homework: &Value) -> Result<String> {
    let Some(obj) = homework.as_object() else {
        return Err(Error::HomeworkStatus(
            "Информация о домашней работе имеет неверный формат".to_string(),
        ));
    };
    let name = obj.get("homework_name").ok_or_else(|| {
        Error::HomeworkStatus(
            "Отсутствует ключ \"homework_name\" в информации о домашней работе".to_string(),
        )
    })?;
    let status = obj.get("status").ok_or_else(|| {
        Error::HomeworkStatus(
            "Отсутствует ключ \"status\" в информации о домашней работе".to_string(),
        )
    })?;

    let verdict = status
        .as_str()
        .and_then(Verdict::from_key)
        .ok_or_else(|| {
            Error::HomeworkStatus(format!(
                "Неожиданный статус домашней работы: {}",
                display_value(status)
            ))
        })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        display_value(name),
        verdict.text()
    ))
}

// Strings without their JSON quotes, everything else as JSON.
pub(crate) fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_every_verdict() {
        for v in Verdict::ALL {
            let msg =
                render_message(&json!({"homework_name": "hw1", "status": v.key()})).unwrap();
            assert_eq!(
                msg,
                format!("Изменился статус проверки работы \"hw1\". {}", v.text())
            );
        }
    }

    #[test]
    fn approved_message_text() {
        let msg = render_message(&json!({
            "homework_name": "user__hw_python_oop.zip",
            "status": "approved",
            "reviewer_comment": "ok"
        }))
        .unwrap();
        assert_eq!(
            msg,
            "Изменился статус проверки работы \"user__hw_python_oop.zip\". \
             Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err =
            render_message(&json!({"homework_name": "hw1", "status": "unknown_status"}))
                .unwrap_err();
        assert!(matches!(err, Error::HomeworkStatus(_)));
        assert!(err.to_string().ends_with("unknown_status"));
    }

    #[test]
    fn malformed_records_are_rejected() {
        for hw in [
            json!("hw1"),
            json!({"status": "approved"}),
            json!({"homework_name": "hw1"}),
            json!({"homework_name": "hw1", "status": 1}),
        ] {
            assert!(matches!(render_message(&hw), Err(Error::HomeworkStatus(_))));
        }
    }
}
