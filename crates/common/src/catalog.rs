//! The fixed catalog of offered cleaning services.
//!
//! Review and contact submissions reference services by [`ServiceInfo::id`].
//! The API does not reject unknown ids; the catalog drives display names,
//! filter options and the client-side service search.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

pub const SERVICES: &[ServiceInfo] = &[
    ServiceInfo {
        id: "ev-temizligi",
        name: "Ev Temizliği",
        description: "Günlük, haftalık ve aylık ev temizlik hizmetleri",
        keywords: &["ev", "temizlik", "günlük", "haftalık", "aylık"],
    },
    ServiceInfo {
        id: "ofis-temizligi",
        name: "Ofis Temizliği",
        description: "Profesyonel ofis ve işyeri temizlik hizmetleri",
        keywords: &["ofis", "işyeri", "profesyonel", "temizlik"],
    },
    ServiceInfo {
        id: "apartman-temizligi",
        name: "Apartman Temizliği",
        description: "Apartman ve site ortak alan temizlik hizmetleri",
        keywords: &["apartman", "site", "ortak", "alan", "temizlik"],
    },
    ServiceInfo {
        id: "insaat-sonrasi",
        name: "İnşaat Sonrası Temizlik",
        description: "İnşaat ve tadilat sonrası derinlemesine temizlik",
        keywords: &["inşaat", "tadilat", "sonrası", "derinlemesine", "temizlik"],
    },
    ServiceInfo {
        id: "villa-temizligi",
        name: "Villa Temizliği",
        description: "Lüks villa ve müstakil ev temizlik hizmetleri",
        keywords: &["villa", "müstakil", "lüks", "ev", "temizlik"],
    },
    ServiceInfo {
        id: "merdiven-temizligi",
        name: "Merdiven Temizliği",
        description: "Apartman ve bina merdiven temizlik hizmetleri",
        keywords: &["merdiven", "apartman", "bina", "temizlik"],
    },
    ServiceInfo {
        id: "zemin-cilalama",
        name: "Zemin Cilalama ve Temizliği",
        description: "Mermer, granit, parke ve sert zeminlerde cilalama ve derin temizlik",
        keywords: &["zemin", "cilalama", "mermer", "granit", "parke"],
    },
    ServiceInfo {
        id: "yat-temizligi",
        name: "Yat Temizliği",
        description: "Marina ve iskelelerde iç-dış yat temizliği",
        keywords: &["yat", "tekne", "marina", "temizlik"],
    },
];

pub fn find(id: &str) -> Option<&'static ServiceInfo> {
    SERVICES.iter().find(|s| s.id == id)
}

pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}

/// Human-readable name; unknown ids are shown as-is.
pub fn display_name(id: &str) -> &str {
    match find(id) {
        Some(s) => s.name,
        None => id,
    }
}
