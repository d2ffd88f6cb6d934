use serde::Serialize;

/// Every icon the site can draw. Names in content files must match an entry
/// of [`ICON_NAMES`] exactly; anything else fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Code,
    Code2,
    Flame,
    Brain,
    Cloud,
    Zap,
    Database,
    Box,
    Eye,
    Atom,
    Triangle,
    FileCode2,
    Palette,
    Sparkles,
    Briefcase,
    GraduationCap,
    Github,
    Linkedin,
    Mail,
    Play,
    Send,
    ArrowRight,
    Download,
    CheckCircle,
    Close,
}

pub const ICON_NAMES: &[(&str, Icon)] = &[
    ("Code", Icon::Code),
    ("Code2", Icon::Code2),
    ("Flame", Icon::Flame),
    ("Brain", Icon::Brain),
    ("Cloud", Icon::Cloud),
    ("Zap", Icon::Zap),
    ("Database", Icon::Database),
    ("Box", Icon::Box),
    ("Eye", Icon::Eye),
    ("Atom", Icon::Atom),
    ("Triangle", Icon::Triangle),
    ("FileCode2", Icon::FileCode2),
    ("Palette", Icon::Palette),
    ("Sparkles", Icon::Sparkles),
    ("Briefcase", Icon::Briefcase),
    ("GraduationCap", Icon::GraduationCap),
    ("Github", Icon::Github),
    ("Linkedin", Icon::Linkedin),
    ("Mail", Icon::Mail),
    ("Play", Icon::Play),
    ("Send", Icon::Send),
    ("ArrowRight", Icon::ArrowRight),
    ("Download", Icon::Download),
    ("CheckCircle", Icon::CheckCircle),
    ("X", Icon::Close),
];

impl Icon {
    pub fn from_name(name: &str) -> Option<Self> {
        ICON_NAMES.iter().find(|(n, _)| *n == name).map(|(_, icon)| *icon)
    }

    pub fn name(self) -> &'static str {
        ICON_NAMES
            .iter()
            .find(|(_, icon)| *icon == self)
            .map_or("", |(n, _)| *n)
    }

    /// Path data for a 24x24 stroked outline.
    pub fn paths(self) -> &'static [&'static str] {
        match self {
            Icon::Code => &["m16 18 6-6-6-6", "m8 6-6 6 6 6"],
            Icon::Code2 => &["m18 16 4-4-4-4", "m6 8-4 4 4 4", "m14.5 4-5 16"],
            Icon::Flame => &["M12 2c1 4 6 6 6 12a6 6 0 0 1-12 0c0-3 2-5 3-6 0 2 1 3 2 3 0-4-1-6 1-9Z"],
            Icon::Brain => &[
                "M9.5 2A2.5 2.5 0 0 0 7 4.5v.5a3 3 0 0 0-2 5 3 3 0 0 0 2 5v.5A2.5 2.5 0 0 0 9.5 18H12V2Z",
                "M14.5 2A2.5 2.5 0 0 1 17 4.5v.5a3 3 0 0 1 2 5 3 3 0 0 1-2 5v.5a2.5 2.5 0 0 1-2.5 2.5H12",
            ],
            Icon::Cloud => &["M17.5 19H9a7 7 0 1 1 6.7-9h1.8a4.5 4.5 0 1 1 0 9Z"],
            Icon::Zap => &["M13 2 3 14h9l-1 8 10-12h-9l1-8z"],
            Icon::Database => &[
                "M3 5c0-1.7 4-3 9-3s9 1.3 9 3-4 3-9 3-9-1.3-9-3",
                "M3 5v14c0 1.7 4 3 9 3s9-1.3 9-3V5",
                "M3 12c0 1.7 4 3 9 3s9-1.3 9-3",
            ],
            Icon::Box => &["M21 8 12 3 3 8v8l9 5 9-5Z", "m3.3 7 8.7 5 8.7-5", "M12 22V12"],
            Icon::Eye => &["M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7Z", "M12 9a3 3 0 1 0 0 6 3 3 0 1 0 0-6"],
            Icon::Atom => &[
                "M12 11a1 1 0 1 0 0 2 1 1 0 1 0 0-2",
                "M20.2 20.2c2-2-.9-8.2-6.4-13.7S2.7 1.8.7 3.8",
                "M3.8 20.2c-2-2 .9-8.2 6.4-13.7s11.7-7.5 13.7-5.5",
            ],
            Icon::Triangle => &["M10.3 3.9 1.8 18a2 2 0 0 0 1.7 3h17a2 2 0 0 0 1.7-3L13.7 3.9a2 2 0 0 0-3.4 0Z"],
            Icon::FileCode2 => &["M4 22h14a2 2 0 0 0 2-2V7l-5-5H6a2 2 0 0 0-2 2v4", "M14 2v4a2 2 0 0 0 2 2h4", "m5 12-3 3 3 3", "m9 18 3-3-3-3"],
            Icon::Palette => &["M12 22a10 10 0 1 1 10-10c0 2.2-1.8 3-3.5 3H16a2 2 0 0 0-1.5 3.3A2 2 0 0 1 12 22Z"],
            Icon::Sparkles => &["m12 3-1.9 5.8a2 2 0 0 1-1.3 1.3L3 12l5.8 1.9a2 2 0 0 1 1.3 1.3L12 21l1.9-5.8a2 2 0 0 1 1.3-1.3L21 12l-5.8-1.9a2 2 0 0 1-1.3-1.3Z"],
            Icon::Briefcase => &["M4 7h16a2 2 0 0 1 2 2v10a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V9a2 2 0 0 1 2-2Z", "M16 21V5a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16"],
            Icon::GraduationCap => &["M22 10 12 5 2 10l10 5 10-5Z", "M6 12v5c3 3 9 3 12 0v-5"],
            Icon::Github => &["M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.1-1.3-.3-2.5-1-3.5.3-1.2.3-2.4 0-3.5 0 0-1 0-3 1.5-2.6-.5-5.4-.5-8 0C6 2 5 2 5 2c-.3 1.1-.3 2.3 0 3.5A5.4 5.4 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.4.5-.7 1.1-.8 1.7-.2.6-.2 1.2-.2 1.8v4", "M9 18c-4.5 2-5-2-7-2"],
            Icon::Linkedin => &["M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6z", "M2 9h4v12H2z", "M4 2a2 2 0 1 0 0 4 2 2 0 1 0 0-4"],
            Icon::Mail => &["M4 4h16a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2Z", "m22 7-10 6L2 7"],
            Icon::Play => &["m6 3 14 9-14 9V3z"],
            Icon::Send => &["m22 2-7 20-4-9-9-4Z", "M22 2 11 13"],
            Icon::ArrowRight => &["M5 12h14", "m12 5 7 7-7 7"],
            Icon::Download => &["M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4", "m7 10 5 5 5-5", "M12 15V3"],
            Icon::CheckCircle => &["M22 11.1V12a10 10 0 1 1-5.9-9.1", "m9 11 3 3L22 4"],
            Icon::Close => &["M18 6 6 18", "m6 6 12 12"],
        }
    }

    /// Inline `<svg>` markup; `class` goes on the root element.
    pub fn svg(self, class: &str) -> String {
        let mut out = format!(
            r#"<svg class="{class}" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">"#
        );
        for d in self.paths() {
            out.push_str(&format!(r#"<path d="{d}"/>"#));
        }
        out.push_str("</svg>");
        out
    }
}

/// Icon shown on a project card for the organisation it was built for.
pub fn company_icon(company: &str) -> Option<Icon> {
    match company {
        "Path Infotech" => Some(Icon::Brain),
        "Research Project" => Some(Icon::Sparkles),
        "Personal Project" => Some(Icon::Code2),
        "Academic Project" => Some(Icon::Database),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_every_icon() {
        for (name, icon) in ICON_NAMES {
            assert_eq!(Icon::from_name(name), Some(*icon));
            assert_eq!(icon.name(), *name);
            assert!(!icon.paths().is_empty());
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(Icon::from_name("code"), None);
        assert_eq!(Icon::from_name("Rocket"), None);
        assert_eq!(Icon::from_name(""), None);
    }

    #[test]
    fn svg_contains_each_path() {
        let svg = Icon::ArrowRight.svg("h-5 w-5");
        assert!(svg.starts_with(r#"<svg class="h-5 w-5""#));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn company_table() {
        assert_eq!(company_icon("Research Project"), Some(Icon::Sparkles));
        assert_eq!(company_icon("Someone Else"), None);
    }
}
