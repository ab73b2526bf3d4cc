/// 고정된 태양광 펌프 시스템 구성. 이름과 N 산정에 쓰이는 기준 전압(base)을 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemProfile {
    pub name: &'static str,
    pub base: u32,
}

/// 지원하는 다섯 가지 시스템 구성. 순서대로 탭/요약표에 표시된다.
pub const SYSTEM_PROFILES: [SystemProfile; 5] = [
    SystemProfile {
        name: "220V Pump",
        base: 420,
    },
    SystemProfile {
        name: "380V Option 1",
        base: 662,
    },
    SystemProfile {
        name: "380V Option 2",
        base: 700,
    },
    SystemProfile {
        name: "380V Option 3",
        base: 720,
    },
    SystemProfile {
        name: "440V Pump",
        base: 720,
    },
];

/// 이름으로 프로파일을 찾는다(대소문자 무시).
pub fn find_profile(name: &str) -> Option<&'static SystemProfile> {
    SYSTEM_PROFILES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
