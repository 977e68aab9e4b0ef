use encoding_rs::Encoding;
use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{Handle, SerializableHandle};

use crate::translation::error::{TranslationError, TranslationResult};

/// 序列化文档
///
/// `document_encoding` 非空且可识别时按该编码输出，否则输出 UTF-8。
pub fn serialize_document(document: &Handle, document_encoding: &str) -> TranslationResult<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = document.clone().into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .map_err(|e| TranslationError::Serialization(e.to_string()))?;

    if !document_encoding.is_empty() {
        if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
            let s: &str = &String::from_utf8_lossy(&buf);
            let (data, _, _) = encoding.encode(s);
            buf = data.to_vec();
        }
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::html_to_dom;

    #[test]
    fn test_serialize_utf8() {
        let dom = html_to_dom("<p>工作流</p>".as_bytes(), "utf-8").unwrap();
        let out = serialize_document(&dom.document, "utf-8").unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("<p>工作流</p>"));
    }

    #[test]
    fn test_serialize_gb18030() {
        let dom = html_to_dom("<p>工作流</p>".as_bytes(), "utf-8").unwrap();
        let out = serialize_document(&dom.document, "gb18030").unwrap();
        let (decoded, _, _) = encoding_rs::GB18030.decode(&out);
        assert!(decoded.contains("<p>工作流</p>"));
        assert!(String::from_utf8(out).is_err());
    }
}
