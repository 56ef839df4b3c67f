use crate::events::{Notice, NoticeVariant};

pub fn render(notice: &Notice) -> String {
    let prefix = match notice.variant {
        NoticeVariant::Default => "»",
        NoticeVariant::Destructive => "!",
    };

    if notice.description.is_empty() {
        format!("{prefix} {}", notice.title)
    } else {
        format!("{prefix} {}: {}", notice.title, notice.description)
    }
}
