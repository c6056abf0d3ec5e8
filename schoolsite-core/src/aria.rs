//! Text used when filling in missing landmarks and image descriptions.

pub const MAIN_LABEL: &str = "Основное содержание";
pub const SKIP_LINK_TEXT: &str = "Перейти к основному содержанию";
pub const MAIN_CONTENT_ID: &str = "main-content";
pub const PANEL_LABEL: &str = "Панель доступности";
pub const RESET_LABEL: &str = "Обычная версия";

pub const ROLE_MAIN: &str = "main";
pub const ROLE_NAVIGATION: &str = "navigation";
pub const ROLE_BANNER: &str = "banner";
pub const ROLE_CONTENT_INFO: &str = "contentinfo";
pub const ROLE_BUTTON: &str = "button";

/// Label for the `index`-th (zero based) `<nav>` on the page.
#[must_use]
pub fn nav_label(index: usize) -> String {
    format!("Навигация {}", index + 1)
}

/// Fallback `alt` text built from the image file name.
#[must_use]
pub fn image_alt(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    format!("Изображение: {file}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_labels_are_one_based() {
        assert_eq!(nav_label(0), "Навигация 1");
        assert_eq!(nav_label(2), "Навигация 3");
    }

    #[test]
    fn image_alt_uses_file_name() {
        assert_eq!(
            image_alt("https://school.example/img/hero/front.jpg"),
            "Изображение: front.jpg"
        );
        assert_eq!(image_alt("logo.png"), "Изображение: logo.png");
        assert_eq!(image_alt("https://school.example/img/"), "Изображение: ");
    }
}
