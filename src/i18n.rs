use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const FOOTER: &str = "general.footer";

    pub const FORM_HEADING: &str = "form.heading";
    pub const FORM_INTRO: &str = "form.intro";
    pub const LABEL_VOC: &str = "form.voc";
    pub const LABEL_PM: &str = "form.pm";
    pub const LABEL_K: &str = "form.k";
    pub const LABEL_PP: &str = "form.pp";
    pub const BUTTON_CALCULATE: &str = "form.calculate";
    pub const PROMPT_DEFAULT_HINT: &str = "prompt.default_hint";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_NEGATIVE: &str = "error.negative";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_N: &str = "result.n";
    pub const RESULT_S: &str = "result.s";
    pub const RESULT_PF: &str = "result.pf";
    pub const RESULT_VTOC: &str = "result.vtoc";
    pub const RESULT_KF: &str = "result.kf";
    pub const WARNING_VOC_PM: &str = "warning.voc_pm";
    pub const INFO_BEFORE_SUBMIT: &str = "info.before_submit";

    pub const SUMMARY_HEADING: &str = "summary.heading";
    pub const BUTTON_EXPORT: &str = "export.button";
    pub const EXPORT_SAVED: &str = "export.saved";
    pub const EXPORT_FALLBACK_NOTE: &str = "export.fallback_note";
    pub const EXPORT_CANCELLED: &str = "export.cancelled";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Tr,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("tr") {
            Language::Tr
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/tr)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 언어팩 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: &Path) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: load_overrides(pack_dir, lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 → 키 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let builtin = match self.lang {
            Language::Tr => tr(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key).to_string()
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn t_with(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key);
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("tr") => Some("tr".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "tr" => Some("tr".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: `[form] voc = "..."` 처럼 키 경로를 테이블로 표현.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{}.toml", Language::from_code(lang).as_code()));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Solar Pump Drive Sizing",
        ERROR_PREFIX => "Error",
        FOOTER => "Solar pump sizing toolbox",
        FORM_HEADING => "Inputs",
        FORM_INTRO => "Enter Voc, Pm, K and Pp. Each system below is sized from the same values.",
        LABEL_VOC => "Voc (panel open-circuit voltage)",
        LABEL_PM => "Pm (panel wattage)",
        LABEL_K => "K (safety coefficient)",
        LABEL_PP => "Pp (pump power)",
        BUTTON_CALCULATE => "Calculate",
        PROMPT_DEFAULT_HINT => "empty = {default}",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_NEGATIVE => "Value must be 0 or greater.",
        RESULT_HEADING => "{name} results (base: {base})",
        RESULT_N => "N (panels per string)",
        RESULT_S => "S (string count)",
        RESULT_PF => "Pf (total installed panel power)",
        RESULT_VTOC => "Vtoc (total per string)",
        RESULT_KF => "Kf (installed power ratio)",
        WARNING_VOC_PM => "Please enter values greater than 0 for Voc and Pm.",
        INFO_BEFORE_SUBMIT => "Base for {name}: {base}. Fill in the form and press Calculate.",
        SUMMARY_HEADING => "Summary of all systems",
        BUTTON_EXPORT => "Download Excel",
        EXPORT_SAVED => "Saved: {path}",
        EXPORT_FALLBACK_NOTE => "Exported with the fallback engine; column widths were not set.",
        EXPORT_CANCELLED => "Export cancelled.",
        _ => return None,
    };
    Some(s)
}

fn tr(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Solar Sürücü Hesaplama Modülü",
        ERROR_PREFIX => "Hata",
        FORM_HEADING => "Girişler",
        FORM_INTRO => "VOC, Pm, K ve Pp değerlerini girin. Aşağıdaki sistemler aynı değerlerle hesaplanır.",
        LABEL_VOC => "Voc (Panel Açık Devre Voltajı)",
        LABEL_PM => "Pm (Panel Watt)",
        LABEL_K => "K (Güvenlik Katsayısı)",
        LABEL_PP => "Pp (Pompa Gücü)",
        BUTTON_CALCULATE => "Hesapla",
        PROMPT_DEFAULT_HINT => "boş = {default}",
        ERROR_INVALID_NUMBER => "Lütfen bir sayı girin.",
        ERROR_NEGATIVE => "Değer 0 veya daha büyük olmalı.",
        RESULT_HEADING => "{name} – Hesap Sonuçları (Taban: {base})",
        RESULT_N => "N (Bir stringdeki panel sayısı)",
        RESULT_S => "S (String sayısı)",
        RESULT_PF => "Pf (Toplam kurulu panel gücü)",
        RESULT_VTOC => "Vtoc (Her string için toplam)",
        RESULT_KF => "Kf (Kurulu güç katsayısı)",
        WARNING_VOC_PM => "Lütfen Voc ve Pm için 0'dan büyük değerler girin.",
        INFO_BEFORE_SUBMIT => "{name} için taban: {base}. Formdan değerleri girip Hesapla'ya basın.",
        SUMMARY_HEADING => "Tüm Sistemler Özeti",
        BUTTON_EXPORT => "Excel indir",
        EXPORT_SAVED => "Kaydedildi: {path}",
        EXPORT_FALLBACK_NOTE => "Yedek motorla dışa aktarıldı; sütun genişlikleri ayarlanmadı.",
        EXPORT_CANCELLED => "Dışa aktarma iptal edildi.",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_falls_back_to_english() {
        let tr = Translator::new("tr-TR");
        assert_eq!(tr.language(), Language::Tr);
        assert_eq!(tr.t(keys::BUTTON_CALCULATE), "Hesapla");
        assert_eq!(tr.t(keys::FOOTER), "Solar pump sizing toolbox");
    }

    #[test]
    fn unknown_key_returns_key() {
        assert_eq!(Translator::new("en").t("no.such.key"), "no.such.key");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("tr"), Some("en")), "tr");
        assert_eq!(resolve_language(Some("auto"), Some("en-GB")), "en");
    }

    #[test]
    fn pack_overrides_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("en.toml"), "[form]\ncalculate = \"Run\"\n").expect("write");
        let t = Translator::new_with_pack("en", dir.path());
        assert_eq!(t.t(keys::BUTTON_CALCULATE), "Run");
        assert_eq!(t.t(keys::LABEL_PM), "Pm (panel wattage)");
    }

    #[test]
    fn placeholders_are_filled() {
        let t = Translator::new("en");
        let s = t.t_with(
            keys::RESULT_HEADING,
            &[("name", "220V Pump".into()), ("base", "420".into())],
        );
        assert_eq!(s, "220V Pump results (base: 420)");
    }
}
