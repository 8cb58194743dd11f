pub const APP_DIR: &str = "assetsweep";
pub const ALLOWLIST_FILE: &str = "allowlist.txt";
pub const PREFERENCES_FILE: &str = "preferences.json";
pub const LOG_FILE: &str = "cleanup.log";

pub const LAST_FOLDER_PATH: &str = "last_folder_path";

pub const UNREAL_EXTENSIONS: [&str; 2] = [".uasset", ".umap"];

pub const AUDIO_PREFIXES: &[&str] = &["LPS_", "WAV_", "MP3_", "OGG_", "SND_", "AUD_"];
pub const TEXTURE_PREFIXES: &[&str] = &["T_", "TD_", "N_", "R_"];
pub const MATERIAL_PREFIXES: &[&str] = &["M_", "MI_", "ML_", "MLB_", "MM_", "MF_", "MAT_"];
pub const BLUEPRINT_PREFIXES: &[&str] = &["BP_", "PC_", "WBP_", "BT_"];
pub const ANIMATION_PREFIXES: &[&str] = &[
    "A_", "ABP_", "AM_", "AO_", "BS_", "SK_", "SKM_", "PA_", "ABM_", "ANIM_", "ANM_",
];
pub const MESH_PREFIXES: &[&str] = &["SM_", "SK_", "PM_", "UM_", "STAT_", "INST_"];
pub const NIAGARA_PREFIXES: &[&str] = &["N_", "NS_"];
pub const UI_PREFIXES: &[&str] = &["WBP_", "UI_"];
pub const VFX_PREFIXES: &[&str] = &["FX_", "VFX_"];
pub const MISC_PREFIXES: &[&str] = &[
    "_C", "SBZ_", "BB_", "C_", "CT_", "DA_", "EQS_", "FFE_", "FT_", "SS_", "ST_", "SLOT_", "Var_",
    "WAD_", "WGD_", "WMD_", "WPD_", "WSD_", "WTD_",
];

pub const DEFAULT_CATALOG: &[(&str, &[&str])] = &[
    ("Audio Prefixes", AUDIO_PREFIXES),
    ("Textures Prefixes", TEXTURE_PREFIXES),
    ("Materials Prefixes", MATERIAL_PREFIXES),
    ("Blueprint Prefixes", BLUEPRINT_PREFIXES),
    ("Animation Prefixes", ANIMATION_PREFIXES),
    ("Mesh Prefixes", MESH_PREFIXES),
    ("Niagara Prefixes", NIAGARA_PREFIXES),
    ("UI Prefixes", UI_PREFIXES),
    ("VFX Prefixes", VFX_PREFIXES),
    ("Misc Prefixes", MISC_PREFIXES),
];
