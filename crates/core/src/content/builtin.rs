//! Content shipped with the site when no content file is supplied.

use folio_protocol::{Catalog, Classification, DisplayMetadata, Item};

use crate::model::{CardStyle, FilterControls, SectionSpec, Site, Threshold};

const DEVICON: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

pub fn builtin_site() -> Site {
    Site {
        title: "Portfolyo".into(),
        all_label: "Tümü".into(),
        sections: vec![projects(), skills()],
    }
}

fn threshold(value: f64) -> Threshold {
    Threshold::new(value).unwrap_or_default()
}

fn projects() -> SectionSpec {
    let items = vec![
        Item::new(
            1,
            "Bütün projelerim github sayfamdadır.",
            Classification::tags(["JavaScript", "Node.js", "MongoDB", "Python", "CSharp"]),
        )
        .with_display(DisplayMetadata {
            image: Some(
                "https://images.pexels.com/photos/6214476/pexels-photo-6214476.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1"
                    .into(),
            ),
            github: Some("https://github.com/Hugekayta".into()),
            link: Some("https://oxyinc.xyz".into()),
            ..DisplayMetadata::default()
        }),
    ];

    SectionSpec::new("projects", "Projeler", Catalog::new(items))
        .with_blurb(
            "İşte bazı son projelerim. Her biri belirli bir sorunu çözmek veya yeni \
             teknolojileri keşfetmek için oluşturuldu.",
        )
        .with_threshold(threshold(0.2))
        .with_style(CardStyle::Project)
        .with_controls(FilterControls::Derived)
}

fn skill(id: u32, name: &str, level: u8, category: &str, icon: &str) -> Item {
    Item::new(id, name, Classification::single(category)).with_display(DisplayMetadata {
        level: Some(level),
        icon: Some(format!("{DEVICON}/{icon}/{icon}-original.svg").into()),
        ..DisplayMetadata::default()
    })
}

fn skills() -> SectionSpec {
    let items = vec![
        skill(1, "JavaScript", 95, "frontend", "javascript"),
        skill(2, "Node.js", 80, "backend", "nodejs"),
        skill(3, "Python", 40, "backend", "python"),
        skill(4, "MongoDB", 70, "backend", "mongodb"),
        skill(5, "Git", 50, "other", "git"),
        skill(6, "CSharp", 30, "backend", "csharp"),
        skill(7, "Adobe Photoshop", 85, "design", "photoshop"),
        skill(8, "Adobe After Effects", 85, "design", "aftereffects"),
    ];

    SectionSpec::new("skills", "Beceriler ve Uzmanlıklar", Catalog::new(items))
        .with_blurb("Fikirleri hayata geçirmek için çalıştığım bazı teknoloji ve araçlar burada.")
        .with_threshold(threshold(0.5))
        .with_style(CardStyle::Skill)
        .with_controls(FilterControls::Fixed(vec![
            "frontend".into(),
            "backend".into(),
            "design".into(),
            "other".into(),
        ]))
}
