// Built-in demo data

use crate::message::UserId;
use crate::store::User;

pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "Алексей", "👨‍💻"),
        User::new(2, "Мария", "👩‍💻"),
        User::new(3, "Дмитрий", "👨‍🔧"),
        User::new(4, "Анна", "👩‍🔬"),
    ]
}

/// `(sender, receiver, text)` in posting order
pub fn demo_messages() -> Vec<(UserId, UserId, &'static str)> {
    vec![
        (1, 2, "Привет! Как продвигается веб-версия?"),
        (2, 1, "Привет! Все отлично, React компоненты готовы"),
        (1, 2, "Круто! C++ часть тоже почти готова"),
        (1, 3, "Дмитрий, сервер готов к деплою?"),
        (3, 1, "Да, Docker контейнеры настроены"),
        (1, 4, "Анна, есть данные для анализа?"),
        (4, 1, "Да, собираю статистику по использованию"),
    ]
}
