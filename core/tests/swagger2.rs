use oas_reader::models::{OperationType, ParameterLocation, ParameterStyle, ReferenceKind, SecuritySchemeType};
use oas_reader::{OpenApiReader, ReaderSettings, SpecVersion};
use pretty_assertions::assert_eq;

const PETSTORE: &str = r##"
swagger: "2.0"
info:
  title: Swagger Petstore
  version: 1.0.0
host: petstore.swagger.io
basePath: /v1
schemes: [https]
consumes: [application/json]
produces: [application/json]
securityDefinitions:
  petstore_auth:
    type: oauth2
    flow: implicit
    authorizationUrl: https://petstore.swagger.io/oauth/dialog
    scopes:
      "write:pets": modify pets
  basic_auth:
    type: basic
definitions:
  Pet:
    type: object
    required: [name]
    properties:
      id: {type: integer, format: int64}
      name: {type: string}
paths:
  /pets:
    get:
      tags: [pets]
      operationId: listPets
      parameters:
        - name: tags
          in: query
          type: array
          items: {type: string}
          collectionFormat: multi
      responses:
        "200":
          description: A list of pets
          schema:
            type: array
            items: {$ref: "#/definitions/Pet"}
    post:
      operationId: addPet
      security:
        - petstore_auth: ["write:pets"]
      parameters:
        - name: pet
          in: body
          required: true
          schema: {$ref: "#/definitions/Pet"}
      responses:
        "201":
          description: Created
  /pets/{petId}/photo:
    post:
      operationId: uploadPhoto
      consumes: [multipart/form-data]
      parameters:
        - {name: petId, in: path, required: true, type: string}
        - {name: file, in: formData, type: file, required: true}
      responses:
        "200":
          description: Uploaded
"##;

#[test]
fn test_petstore_converts_to_openapi_3_shape() {
    let result = OpenApiReader::default().read_str(PETSTORE).unwrap();
    let diagnostic = &result.diagnostic;
    assert!(diagnostic.is_clean(), "{diagnostic:?}");
    assert_eq!(diagnostic.spec_version, Some(SpecVersion::V2));

    let document = &result.document;
    assert_eq!(document.info.title, "Swagger Petstore");
    let servers: Vec<_> = document.servers.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(servers, vec!["https://petstore.swagger.io/v1"]);

    let pets = document.paths.items["/pets"].as_item().unwrap();
    let list = pets.operation(OperationType::Get).unwrap();
    assert_eq!(list.tag_names(), vec!["pets"]);
    let tags = list.parameters[0].as_item().unwrap();
    assert_eq!(tags.location, Some(ParameterLocation::Query));
    assert_eq!(tags.style, Some(ParameterStyle::Form));
    assert_eq!(tags.explode, Some(true));
    let ok = list.responses.get("200").unwrap().as_item().unwrap();
    let schema = ok.content["application/json"].schema.as_ref().unwrap();
    assert!(schema.as_item().unwrap().has_type("array"));

    let add = pets.operation(OperationType::Post).unwrap();
    assert!(add.parameters.is_empty());
    let body = add.request_body.as_ref().unwrap().as_item().unwrap();
    assert!(body.required);
    let pet = body.content["application/json"].schema.as_ref().unwrap();
    assert_eq!(pet.as_reference().unwrap().kind, ReferenceKind::Schema);
    assert_eq!(add.security.as_ref().unwrap()[0].schemes["petstore_auth"], vec!["write:pets"]);
}

#[test]
fn test_form_data_and_security_definitions() {
    let result = OpenApiReader::default().read_str(PETSTORE).unwrap();
    let document = result.document;

    let photo = document.paths.items["/pets/{petId}/photo"].as_item().unwrap();
    let upload = photo.operation(OperationType::Post).unwrap();
    assert_eq!(upload.parameters.len(), 1);
    let body = upload.request_body.as_ref().unwrap().as_item().unwrap();
    let media_types: Vec<_> = body.content.keys().cloned().collect();
    assert_eq!(media_types, vec!["multipart/form-data"]);
    let form = body.content["multipart/form-data"]
        .schema
        .as_ref()
        .unwrap()
        .as_item()
        .unwrap();
    assert_eq!(form.required, vec!["file"]);
    let file = form.properties["file"].as_item().unwrap();
    assert!(file.has_type("string"));
    assert_eq!(file.format.as_deref(), Some("binary"));

    let schemes = &document.components.as_ref().unwrap().security_schemes;
    let oauth = schemes["petstore_auth"].as_item().unwrap();
    assert_eq!(oauth.scheme_type, Some(SecuritySchemeType::OAuth2));
    let implicit = oauth.flows.as_ref().unwrap().implicit.as_ref().unwrap();
    assert_eq!(
        implicit.authorization_url.as_deref(),
        Some("https://petstore.swagger.io/oauth/dialog")
    );
    assert_eq!(implicit.scopes["write:pets"], "modify pets");
    let basic = schemes["basic_auth"].as_item().unwrap();
    assert_eq!(basic.scheme_type, Some(SecuritySchemeType::Http));
    assert_eq!(basic.scheme.as_deref(), Some("basic"));
}

#[test]
fn test_malformed_fields_are_reported_and_siblings_survive() {
    let text = r##"
swagger: "2.0"
info: {title: t, version: "1"}
paths:
  /pets:
    get:
      parameters:
        - {name: limit, in: query, type: integer, required: maybe}
        - {name: offset, in: query, type: integer}
      responses: {}
"##;
    let result = OpenApiReader::default().read_str(text).unwrap();
    let errors = &result.diagnostic.errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].pointer, "#/paths/~1pets/get/parameters/0/required");
    assert_eq!(errors[0].message, "'maybe' is not a valid boolean");

    let pets = result.document.paths.items["/pets"].as_item().unwrap();
    let get = pets.operation(OperationType::Get).unwrap();
    let names: Vec<_> = get
        .parameters
        .iter()
        .map(|p| p.as_item().unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["limit", "offset"]);
}

#[test]
fn test_multiple_body_parameters_warn_and_last_wins() {
    let text = r##"
swagger: "2.0"
info: {title: t, version: "1"}
paths:
  /pets:
    put:
      parameters:
        - {name: first, in: body, schema: {type: string}}
        - {name: second, in: body, schema: {type: integer}}
      responses: {}
"##;
    let result = OpenApiReader::default().read_str(text).unwrap();
    assert!(result.diagnostic.is_clean());
    assert_eq!(result.diagnostic.warnings.len(), 1);
    let pets = result.document.paths.items["/pets"].as_item().unwrap();
    let put = pets.operation(OperationType::Put).unwrap();
    let body = put.request_body.as_ref().unwrap().as_item().unwrap();
    assert_eq!(body.extensions["x-bodyName"], "second");

    let quiet = OpenApiReader::new(ReaderSettings {
        report_multiple_body_parameters: false,
        ..Default::default()
    });
    assert!(quiet.read_str(text).unwrap().diagnostic.warnings.is_empty());
}

#[test]
fn test_operation_schemes_and_default_content_type() {
    let text = r##"
swagger: "2.0"
info: {title: t, version: "1"}
host: api.example.com
schemes: [https]
paths:
  /ping:
    get:
      schemes: [http, ws]
      responses:
        "200":
          description: pong
          schema: {type: string}
"##;
    let reader = OpenApiReader::new(ReaderSettings {
        default_content_type: vec!["text/plain".into()],
        ..Default::default()
    });
    let result = reader.read_str(text).unwrap();
    let ping = result.document.paths.items["/ping"].as_item().unwrap();
    let get = ping.operation(OperationType::Get).unwrap();
    let servers: Vec<_> = get.servers.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(servers, vec!["http://api.example.com", "ws://api.example.com"]);
    let ok = get.responses.get("200").unwrap().as_item().unwrap();
    let media_types: Vec<_> = ok.content.keys().cloned().collect();
    assert_eq!(media_types, vec!["text/plain"]);
}

#[test]
fn test_escaped_definition_names_resolve() {
    let text = r##"
swagger: "2.0"
info: {title: t, version: "1"}
paths:
  /pets:
    get:
      responses:
        "200":
          description: ok
          schema: {$ref: "#/definitions/a~1b"}
definitions:
  a/b: {type: string}
"##;
    let result = OpenApiReader::default().read_str(text).unwrap();
    assert!(result.diagnostic.is_clean(), "{:?}", result.diagnostic);

    let pets = result.document.paths.items["/pets"].as_item().unwrap();
    let ok = pets.operation(OperationType::Get).unwrap().responses.get("200").unwrap();
    let schema = ok.as_item().unwrap().content["application/octet-stream"]
        .schema
        .as_ref()
        .unwrap();
    let reference = schema.as_reference().unwrap();
    assert_eq!(reference.id.as_deref(), Some("a/b"));
    assert_eq!(reference.to_string(), "#/components/schemas/a~1b");
}

#[test]
fn test_path_level_body_follows_operation_consumes() {
    let text = r##"
swagger: "2.0"
info: {title: t, version: "1"}
paths:
  /pets:
    parameters:
      - {name: pet, in: body, schema: {type: object}}
    post:
      consumes: [application/xml]
      responses: {}
"##;
    let result = OpenApiReader::default().read_str(text).unwrap();
    let pets = result.document.paths.items["/pets"].as_item().unwrap();
    let post = pets.operation(OperationType::Post).unwrap();
    let body = post.request_body.as_ref().unwrap().as_item().unwrap();
    let types: Vec<_> = body.content.keys().cloned().collect();
    assert_eq!(types, vec!["application/xml"]);
}
