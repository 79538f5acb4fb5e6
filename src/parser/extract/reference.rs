use crate::parser::model::ReferenceEntry;
use crate::parser::sections::Section;

/// Keep a mechanics or lore section whole.
pub fn extract(section: &Section) -> ReferenceEntry {
    ReferenceEntry {
        title: section.header.clone(),
        content: section.text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::Category;

    #[test]
    fn reference_keeps_lines() {
        let section = Section {
            header: "house rules".into(),
            content: vec!["Crits explode.".into(), "Flanking gives +2.".into()],
            category: Category::Mechanics,
        };
        let entry = extract(&section);
        assert_eq!(entry.title, "house rules");
        assert_eq!(entry.content, "Crits explode.\nFlanking gives +2.");
    }
}
