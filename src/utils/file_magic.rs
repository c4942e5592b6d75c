//! 上传文件的类型识别：扩展名对应的魔术字节与下载时的 Content-Type

/// 文件头签名
enum Signature {
    /// 以固定字节开头
    Prefix(&'static [&'static [u8]]),
    /// RIFF 容器，偏移 8 处为子类型
    Riff(&'static [u8; 4]),
    /// 纯文本，不检查
    Text,
}

struct FileKind {
    extensions: &'static [&'static str],
    signature: Signature,
    content_type: &'static str,
}

const ZIP: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

static KINDS: &[FileKind] = &[
    FileKind {
        extensions: &[".png"],
        signature: Signature::Prefix(&[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]]),
        content_type: "image/png",
    },
    FileKind {
        extensions: &[".jpg", ".jpeg"],
        signature: Signature::Prefix(&[&[0xFF, 0xD8, 0xFF]]),
        content_type: "image/jpeg",
    },
    FileKind {
        extensions: &[".gif"],
        signature: Signature::Prefix(&[b"GIF87a", b"GIF89a"]),
        content_type: "image/gif",
    },
    FileKind {
        extensions: &[".webp"],
        signature: Signature::Riff(b"WEBP"),
        content_type: "image/webp",
    },
    FileKind {
        extensions: &[".pdf"],
        signature: Signature::Prefix(&[b"%PDF"]),
        content_type: "application/pdf",
    },
    FileKind {
        extensions: &[".doc"],
        signature: Signature::Prefix(&[OLE]),
        content_type: "application/msword",
    },
    FileKind {
        extensions: &[".ppt"],
        signature: Signature::Prefix(&[OLE]),
        content_type: "application/vnd.ms-powerpoint",
    },
    FileKind {
        extensions: &[".xls"],
        signature: Signature::Prefix(&[OLE]),
        content_type: "application/vnd.ms-excel",
    },
    FileKind {
        extensions: &[".docx"],
        signature: Signature::Prefix(&[ZIP]),
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    },
    FileKind {
        extensions: &[".pptx"],
        signature: Signature::Prefix(&[ZIP]),
        content_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    },
    FileKind {
        extensions: &[".xlsx"],
        signature: Signature::Prefix(&[ZIP]),
        content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    },
    FileKind {
        extensions: &[".zip"],
        signature: Signature::Prefix(&[ZIP]),
        content_type: "application/zip",
    },
    FileKind {
        extensions: &[".mp4"],
        signature: Signature::Text, // ftyp 盒子位置不固定
        content_type: "video/mp4",
    },
    FileKind {
        extensions: &[".txt", ".md", ".csv"],
        signature: Signature::Text,
        content_type: "text/plain; charset=utf-8",
    },
];

fn kind_for(extension: &str) -> Option<&'static FileKind> {
    let extension = extension.to_lowercase();
    KINDS
        .iter()
        .find(|kind| kind.extensions.contains(&extension.as_str()))
}

/// 验证文件头是否与扩展名（含点号，如 ".png"）匹配；未知扩展名一律拒绝
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match kind_for(extension).map(|kind| &kind.signature) {
        Some(Signature::Prefix(prefixes)) => prefixes.iter().any(|p| data.starts_with(p)),
        Some(Signature::Riff(subtype)) => {
            data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == subtype.as_slice()
        }
        Some(Signature::Text) => true,
        None => false,
    }
}

/// 下载时使用的 Content-Type
pub fn content_type_for(extension: &str) -> &'static str {
    kind_for(extension)
        .map(|kind| kind.content_type)
        .unwrap_or("application/octet-stream")
}
