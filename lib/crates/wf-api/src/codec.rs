//! XML-RPC call encoding and response decoding.
//!
//! The wire format is the classic XML-RPC subset the control plane speaks:
//! `i4`/`int`, `boolean` (0/1), `string`, `double`, `array`, `struct`, and
//! `fault` responses. Untyped `<value>` content decodes as a string, per the
//! XML-RPC specification. Whitespace between structural elements is skipped;
//! whitespace inside scalar values is preserved.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use thiserror::Error;

use crate::value::Value;

/// A server-reported XML-RPC fault (`faultCode` / `faultString`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fault {code}: {message}")]
pub struct Fault {
    pub code: i32,
    pub message: String,
}

/// Decoded form of a `<methodResponse>` document.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Value),
    Fault(Fault),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed XML in control-plane response: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("unexpected {0} in control-plane response")]
    UnexpectedElement(String),
    #[error("control-plane response ended mid-document")]
    Truncated,
    #[error("invalid {kind} value {text:?} in control-plane response")]
    InvalidScalar { kind: &'static str, text: String },
    #[error("{record} record is missing the {field:?} member")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    #[error("{record} record has a malformed {field:?} member")]
    WrongType {
        record: &'static str,
        field: &'static str,
    },
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Render a `<methodCall>` document for `method` with the given parameters.
#[must_use]
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut xml = String::with_capacity(256);
    xml.push_str(r#"<?xml version="1.0"?>"#);
    xml.push_str("<methodCall><methodName>");
    xml.push_str(&escape(method));
    xml.push_str("</methodName><params>");
    for param in params {
        xml.push_str("<param>");
        write_value(&mut xml, param);
        xml.push_str("</param>");
    }
    xml.push_str("</params></methodCall>");
    xml
}

fn write_value(xml: &mut String, value: &Value) {
    xml.push_str("<value>");
    match value {
        Value::Int(n) => {
            xml.push_str("<int>");
            xml.push_str(&n.to_string());
            xml.push_str("</int>");
        }
        Value::Bool(b) => {
            xml.push_str(if *b {
                "<boolean>1</boolean>"
            } else {
                "<boolean>0</boolean>"
            });
        }
        Value::Str(s) => {
            xml.push_str("<string>");
            xml.push_str(&escape(s));
            xml.push_str("</string>");
        }
        Value::Double(d) => {
            xml.push_str("<double>");
            xml.push_str(&d.to_string());
            xml.push_str("</double>");
        }
        Value::Array(items) => {
            xml.push_str("<array><data>");
            for item in items {
                write_value(xml, item);
            }
            xml.push_str("</data></array>");
        }
        Value::Struct(members) => {
            xml.push_str("<struct>");
            for (name, member) in members {
                xml.push_str("<member><name>");
                xml.push_str(&escape(name));
                xml.push_str("</name>");
                write_value(xml, member);
                xml.push_str("</member>");
            }
            xml.push_str("</struct>");
        }
    }
    xml.push_str("</value>");
}

// ── Decoding ─────────────────────────────────────────────────────────────────

/// Decode a `<methodResponse>` document into either the result value or the
/// server-reported fault.
pub fn decode_response(xml: &str) -> Result<Response, CodecError> {
    let mut reader = Reader::from_str(xml);
    expect_start(&mut reader, b"methodResponse")?;
    match next_structural(&mut reader)? {
        Event::Start(e) if e.name().as_ref() == b"params" => {
            expect_start(&mut reader, b"param")?;
            expect_start(&mut reader, b"value")?;
            let value = parse_value(&mut reader)?;
            expect_end(&mut reader, b"param")?;
            expect_end(&mut reader, b"params")?;
            expect_end(&mut reader, b"methodResponse")?;
            Ok(Response::Success(value))
        }
        Event::Start(e) if e.name().as_ref() == b"fault" => {
            expect_start(&mut reader, b"value")?;
            let value = parse_value(&mut reader)?;
            expect_end(&mut reader, b"fault")?;
            expect_end(&mut reader, b"methodResponse")?;
            Ok(Response::Fault(fault_from_value(&value)?))
        }
        Event::Eof => Err(CodecError::Truncated),
        other => Err(unexpected(&other)),
    }
}

fn fault_from_value(value: &Value) -> Result<Fault, CodecError> {
    let code = value
        .get("faultCode")
        .ok_or(CodecError::MissingField {
            record: "fault",
            field: "faultCode",
        })?
        .as_i64()
        .ok_or(CodecError::WrongType {
            record: "fault",
            field: "faultCode",
        })?;
    let message = value
        .get("faultString")
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingField {
            record: "fault",
            field: "faultString",
        })?;
    let code = i32::try_from(code).map_err(|_| CodecError::WrongType {
        record: "fault",
        field: "faultCode",
    })?;
    Ok(Fault {
        code,
        message: message.to_owned(),
    })
}

/// Parse the body of a `<value>` element; the opening tag has already been
/// consumed. Untyped content becomes a string.
fn parse_value(reader: &mut Reader<&[u8]>) -> Result<Value, CodecError> {
    let mut text = String::new();
    let mut typed: Option<Value> = None;
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::Start(e) => match e.name().as_ref() {
                tag @ (b"string" | b"int" | b"i4" | b"boolean" | b"double") => {
                    typed = Some(parse_scalar(reader, tag)?);
                }
                b"array" => typed = Some(parse_array(reader)?),
                b"struct" => typed = Some(parse_struct(reader)?),
                other => return Err(unexpected_tag(other)),
            },
            Event::Empty(e) => match e.name().as_ref() {
                // `<string/>` is how some responses spell an empty string.
                b"string" => typed = Some(Value::Str(String::new())),
                other => return Err(unexpected_tag(other)),
            },
            Event::End(e) if e.name().as_ref() == b"value" => {
                return Ok(typed.unwrap_or(Value::Str(text)));
            }
            Event::Eof => return Err(CodecError::Truncated),
            other => return Err(unexpected(&other)),
        }
    }
}

fn parse_scalar(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<Value, CodecError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::End(e) if e.name().as_ref() == tag => return scalar_from_text(tag, &text),
            Event::Eof => return Err(CodecError::Truncated),
            other => return Err(unexpected(&other)),
        }
    }
}

fn scalar_from_text(tag: &[u8], text: &str) -> Result<Value, CodecError> {
    match tag {
        b"string" => Ok(Value::Str(text.to_owned())),
        b"int" | b"i4" => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| CodecError::InvalidScalar {
                kind: "int",
                text: text.to_owned(),
            }),
        b"boolean" => match text.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            _ => Err(CodecError::InvalidScalar {
                kind: "boolean",
                text: text.to_owned(),
            }),
        },
        b"double" => text
            .trim()
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| CodecError::InvalidScalar {
                kind: "double",
                text: text.to_owned(),
            }),
        other => Err(unexpected_tag(other)),
    }
}

fn parse_array(reader: &mut Reader<&[u8]>) -> Result<Value, CodecError> {
    expect_start(reader, b"data")?;
    let mut items = Vec::new();
    loop {
        match next_structural(reader)? {
            Event::Start(e) if e.name().as_ref() == b"value" => {
                items.push(parse_value(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"data" => {
                expect_end(reader, b"array")?;
                return Ok(Value::Array(items));
            }
            Event::Eof => return Err(CodecError::Truncated),
            other => return Err(unexpected(&other)),
        }
    }
}

fn parse_struct(reader: &mut Reader<&[u8]>) -> Result<Value, CodecError> {
    let mut members = std::collections::BTreeMap::new();
    loop {
        match next_structural(reader)? {
            Event::Start(e) if e.name().as_ref() == b"member" => {
                expect_start(reader, b"name")?;
                let name = parse_member_name(reader)?;
                expect_start(reader, b"value")?;
                let value = parse_value(reader)?;
                expect_end(reader, b"member")?;
                members.insert(name, value);
            }
            Event::End(e) if e.name().as_ref() == b"struct" => {
                return Ok(Value::Struct(members));
            }
            Event::Eof => return Err(CodecError::Truncated),
            other => return Err(unexpected(&other)),
        }
    }
}

fn parse_member_name(reader: &mut Reader<&[u8]>) -> Result<String, CodecError> {
    let mut name = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => name.push_str(&t.unescape()?),
            Event::End(e) if e.name().as_ref() == b"name" => return Ok(name),
            Event::Eof => return Err(CodecError::Truncated),
            other => return Err(unexpected(&other)),
        }
    }
}

/// Next event that matters structurally: skips the declaration, comments,
/// processing instructions, and whitespace-only text between elements.
fn next_structural<'i>(reader: &mut Reader<&'i [u8]>) -> Result<Event<'i>, CodecError> {
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
            Event::Text(t) => {
                if t.unescape()?.trim().is_empty() {
                    continue;
                }
            }
            _ => {}
        }
        return Ok(event);
    }
}

fn expect_start(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<(), CodecError> {
    match next_structural(reader)? {
        Event::Start(e) if e.name().as_ref() == tag => Ok(()),
        Event::Eof => Err(CodecError::Truncated),
        other => Err(unexpected(&other)),
    }
}

fn expect_end(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<(), CodecError> {
    match next_structural(reader)? {
        Event::End(e) if e.name().as_ref() == tag => Ok(()),
        Event::Eof => Err(CodecError::Truncated),
        other => Err(unexpected(&other)),
    }
}

fn unexpected_tag(tag: &[u8]) -> CodecError {
    CodecError::UnexpectedElement(format!("<{}>", String::from_utf8_lossy(tag)))
}

fn unexpected(event: &Event<'_>) -> CodecError {
    let what = match event {
        Event::Start(e) | Event::Empty(e) => {
            format!("<{}>", String::from_utf8_lossy(e.name().as_ref()))
        }
        Event::End(e) => format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Text(_) | Event::CData(_) => "text content".to_owned(),
        other => format!("{other:?}"),
    };
    CodecError::UnexpectedElement(what)
}
