//! Minimal XML-RPC codec: enough of the value model to talk to the
//! WordPress `wp.*` and `mt.*` methods.

use crate::utils::error::{PresserError, Result};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    String(String),
    Double(f64),
    DateTime(String),
    Base64(String),
    Nil,
    Array(Vec<Value>),
    Struct(Vec<(String, Value)>),
}

impl Value {
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<value>");
        match self {
            Value::Int(i) => out.push_str(&format!("<int>{}</int>", i)),
            Value::Bool(b) => out.push_str(&format!("<boolean>{}</boolean>", u8::from(*b))),
            Value::String(s) => {
                out.push_str("<string>");
                out.push_str(&escape(s.as_str()));
                out.push_str("</string>");
            }
            Value::Double(d) => out.push_str(&format!("<double>{}</double>", d)),
            Value::DateTime(s) => {
                out.push_str("<dateTime.iso8601>");
                out.push_str(&escape(s.as_str()));
                out.push_str("</dateTime.iso8601>");
            }
            Value::Base64(s) => {
                out.push_str("<base64>");
                out.push_str(&escape(s.as_str()));
                out.push_str("</base64>");
            }
            Value::Nil => out.push_str("<nil/>"),
            Value::Array(items) => {
                out.push_str("<array><data>");
                for item in items {
                    item.write_xml(out);
                }
                out.push_str("</data></array>");
            }
            Value::Struct(members) => {
                out.push_str("<struct>");
                for (name, value) in members {
                    out.push_str("<member><name>");
                    out.push_str(&escape(name.as_str()));
                    out.push_str("</name>");
                    value.write_xml(out);
                    out.push_str("</member>");
                }
                out.push_str("</struct>");
            }
        }
        out.push_str("</value>");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub params: Vec<Value>,
}

impl MethodCall {
    pub fn new(method: &str, params: Vec<Value>) -> Self {
        Self {
            method: method.to_string(),
            params,
        }
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n<methodCall><methodName>");
        out.push_str(&escape(self.method.as_str()));
        out.push_str("</methodName><params>");
        for param in &self.params {
            out.push_str("<param>");
            param.write_xml(&mut out);
            out.push_str("</param>");
        }
        out.push_str("</params></methodCall>\n");
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Fault { code: i64, message: String },
}

pub fn parse_response(body: &str) -> Result<MethodResponse> {
    let mut parser = ResponseParser::new(body);
    parser.expect_start("methodResponse")?;

    let response = match parser.next_tag()? {
        Token::Start(name) if name == "params" => {
            parser.expect_start("param")?;
            parser.expect_start("value")?;
            let value = parser.parse_value()?;
            parser.expect_end("param")?;
            parser.expect_end("params")?;
            MethodResponse::Success(value)
        }
        Token::Start(name) if name == "fault" => {
            parser.expect_start("value")?;
            let value = parser.parse_value()?;
            parser.expect_end("fault")?;
            let code = value
                .member("faultCode")
                .and_then(Value::as_i64)
                .ok_or_else(|| malformed("fault without an integer faultCode"))?;
            let message = value
                .member("faultString")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            MethodResponse::Fault { code, message }
        }
        other => return Err(malformed(&format!("unexpected {:?} in methodResponse", other))),
    };

    parser.expect_end("methodResponse")?;
    Ok(response)
}

fn malformed(message: &str) -> PresserError {
    PresserError::XmlRpcError {
        message: message.to_string(),
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Start(String),
    End(String),
    Empty(String),
    Text(String),
    Eof,
}

struct ResponseParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> ResponseParser<'a> {
    fn new(body: &'a str) -> Self {
        Self {
            reader: Reader::from_str(body),
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        loop {
            let event = self
                .reader
                .read_event()
                .map_err(|e| malformed(&e.to_string()))?;
            return Ok(match event {
                Event::Start(e) => Token::Start(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
                Event::End(e) => Token::End(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
                Event::Empty(e) => Token::Empty(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
                Event::Text(e) => Token::Text(e.unescape().map_err(|e| malformed(&e.to_string()))?.into_owned()),
                Event::CData(e) => Token::Text(String::from_utf8_lossy(&e.into_inner()).into_owned()),
                Event::Eof => Token::Eof,
                _ => continue,
            });
        }
    }

    /// Like `next_token`, but skips whitespace between elements.
    fn next_tag(&mut self) -> Result<Token> {
        loop {
            match self.next_token()? {
                Token::Text(t) if t.trim().is_empty() => continue,
                token => return Ok(token),
            }
        }
    }

    fn expect_start(&mut self, name: &str) -> Result<()> {
        match self.next_tag()? {
            Token::Start(n) if n == name => Ok(()),
            other => Err(malformed(&format!("expected <{}>, found {:?}", name, other))),
        }
    }

    fn expect_end(&mut self, name: &str) -> Result<()> {
        match self.next_tag()? {
            Token::End(n) if n == name => Ok(()),
            other => Err(malformed(&format!("expected </{}>, found {:?}", name, other))),
        }
    }

    /// Parses the body of a `<value>` whose start tag was already consumed,
    /// including the closing `</value>`.
    fn parse_value(&mut self) -> Result<Value> {
        let mut untyped = String::new();
        loop {
            match self.next_token()? {
                Token::Text(t) => untyped.push_str(&t),
                Token::Start(kind) => {
                    let value = self.parse_typed(&kind)?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Token::Empty(kind) => {
                    let value = empty_typed(&kind)?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Token::End(n) if n == "value" => return Ok(Value::String(untyped)),
                other => return Err(malformed(&format!("unexpected {:?} inside <value>", other))),
            }
        }
    }

    fn parse_typed(&mut self, kind: &str) -> Result<Value> {
        match kind {
            "array" => self.parse_array(),
            "struct" => self.parse_struct(),
            _ => {
                let text = self.read_text(kind)?;
                scalar(kind, text)
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        match self.next_tag()? {
            Token::Empty(n) if n == "data" => {}
            Token::Start(n) if n == "data" => loop {
                match self.next_tag()? {
                    Token::Start(v) if v == "value" => items.push(self.parse_value()?),
                    Token::Empty(v) if v == "value" => items.push(Value::String(String::new())),
                    Token::End(d) if d == "data" => break,
                    other => return Err(malformed(&format!("unexpected {:?} inside <data>", other))),
                }
            },
            other => return Err(malformed(&format!("expected <data>, found {:?}", other))),
        }
        self.expect_end("array")?;
        Ok(Value::Array(items))
    }

    fn parse_struct(&mut self) -> Result<Value> {
        let mut members = Vec::new();
        loop {
            match self.next_tag()? {
                Token::Start(m) if m == "member" => {
                    self.expect_start("name")?;
                    let name = self.read_text("name")?;
                    let value = match self.next_tag()? {
                        Token::Start(v) if v == "value" => self.parse_value()?,
                        Token::Empty(v) if v == "value" => Value::String(String::new()),
                        other => return Err(malformed(&format!("expected <value>, found {:?}", other))),
                    };
                    self.expect_end("member")?;
                    members.push((name, value));
                }
                Token::End(s) if s == "struct" => return Ok(Value::Struct(members)),
                other => return Err(malformed(&format!("unexpected {:?} inside <struct>", other))),
            }
        }
    }

    fn read_text(&mut self, closing: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_token()? {
                Token::Text(t) => text.push_str(&t),
                Token::End(n) if n == closing => return Ok(text),
                other => return Err(malformed(&format!("unexpected {:?} inside <{}>", other, closing))),
            }
        }
    }
}

fn scalar(kind: &str, text: String) -> Result<Value> {
    match kind {
        "string" => Ok(Value::String(text)),
        "int" | "i4" | "i8" => text
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| malformed(&format!("invalid integer '{}'", text))),
        "boolean" => match text.trim() {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            other => Err(malformed(&format!("invalid boolean '{}'", other))),
        },
        "double" => text
            .trim()
            .parse()
            .map(Value::Double)
            .map_err(|_| malformed(&format!("invalid double '{}'", text))),
        "dateTime.iso8601" => Ok(Value::DateTime(text.trim().to_string())),
        "base64" => Ok(Value::Base64(text.trim().to_string())),
        other => Err(malformed(&format!("unknown value type <{}>", other))),
    }
}

fn empty_typed(kind: &str) -> Result<Value> {
    match kind {
        "nil" => Ok(Value::Nil),
        "string" => Ok(Value::String(String::new())),
        "array" => Ok(Value::Array(Vec::new())),
        "struct" => Ok(Value::Struct(Vec::new())),
        other => Err(malformed(&format!("empty <{}/> is not a valid value", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_call_escapes_text() {
        let call = MethodCall::new(
            "wp.newPost",
            vec![
                Value::Int(0),
                Value::Struct(vec![(
                    "post_content".to_string(),
                    Value::String("<p>Fish & chips</p>".to_string()),
                )]),
            ],
        );
        let xml = call.to_xml();

        assert!(xml.contains("<methodName>wp.newPost</methodName>"));
        assert!(xml.contains("<param><value><int>0</int></value></param>"));
        assert!(xml.contains("&lt;p&gt;Fish &amp; chips&lt;/p&gt;"));
        assert!(xml.contains("<member><name>post_content</name>"));
    }

    #[test]
    fn test_parse_string_response() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodResponse>
  <params>
    <param>
      <value>
      <string>42</string>
      </value>
    </param>
  </params>
</methodResponse>"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response, MethodResponse::Success(Value::String("42".to_string())));
    }

    #[test]
    fn test_parse_untyped_value_is_string() {
        let body = "<methodResponse><params><param><value>hello &amp; bye</value></param></params></methodResponse>";
        let response = parse_response(body).unwrap();
        assert_eq!(response, MethodResponse::Success(Value::String("hello & bye".to_string())));
    }

    #[test]
    fn test_parse_array_of_strings() {
        let body = "<methodResponse><params><param><value><array><data>\
            <value><string>wp.newPost</string></value>\
            <value><string>wp.getPost</string></value>\
            </data></array></value></param></params></methodResponse>";
        let response = parse_response(body).unwrap();
        assert_eq!(
            response,
            MethodResponse::Success(Value::Array(vec![
                Value::String("wp.newPost".to_string()),
                Value::String("wp.getPost".to_string()),
            ]))
        );
    }

    #[test]
    fn test_parse_fault() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<methodResponse>
  <fault>
    <value>
      <struct>
        <member><name>faultCode</name><value><int>403</int></value></member>
        <member><name>faultString</name><value><string>Incorrect username or password.</string></value></member>
      </struct>
    </value>
  </fault>
</methodResponse>"#;
        let response = parse_response(body).unwrap();
        assert_eq!(
            response,
            MethodResponse::Fault {
                code: 403,
                message: "Incorrect username or password.".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_scalars_and_nested_struct() {
        let body = "<methodResponse><params><param><value><struct>\
            <member><name>ok</name><value><boolean>1</boolean></value></member>\
            <member><name>ratio</name><value><double>0.5</double></value></member>\
            <member><name>none</name><value><nil/></value></member>\
            <member><name>tags</name><value><array><data/></array></value></member>\
            </struct></value></param></params></methodResponse>";
        let value = match parse_response(body).unwrap() {
            MethodResponse::Success(v) => v,
            other => panic!("unexpected response: {:?}", other),
        };
        assert_eq!(value.member("ok"), Some(&Value::Bool(true)));
        assert_eq!(value.member("ratio"), Some(&Value::Double(0.5)));
        assert_eq!(value.member("none"), Some(&Value::Nil));
        assert_eq!(value.member("tags"), Some(&Value::Array(vec![])));
    }

    #[test]
    fn test_parse_rejects_html() {
        let body = "<html><body>XML-RPC server accepts POST requests only.</body></html>";
        assert!(matches!(
            parse_response(body),
            Err(PresserError::XmlRpcError { .. })
        ));
    }
}
