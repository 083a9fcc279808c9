use oas_reader::models::{
    ExclusiveBound, LinkParameter, OperationType, ParameterLocation, RefOr, ReferenceKind,
    RuntimeExpression, Schema,
};
use oas_reader::{OpenApiReader, ReaderSettings, SpecVersion};
use pretty_assertions::assert_eq;

const PETSTORE_3_0: &str = r##"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
  contact: {name: API Team, email: api@example.com}
servers:
  - url: https://{env}.example.com/v1
    variables:
      env: {default: api, enum: [api, staging]}
tags:
  - name: pets
    description: Pet operations
paths:
  /pets/{petId}:
    parameters:
      - $ref: "#/components/parameters/PetId"
    get:
      tags: [pets]
      operationId: getPet
      responses:
        "200":
          description: A pet
          content:
            application/json:
              schema: {$ref: "#/components/schemas/Pet"}
          links:
            owner:
              operationId: getOwner
              parameters:
                ownerId: $response.body#/ownerId
        default:
          $ref: "#/components/responses/Error"
  /pets:
    post:
      operationId: addPet
      requestBody:
        $ref: "#/components/requestBodies/NewPet"
      callbacks:
        onAdopted:
          "{$request.body#/callbackUrl}":
            post:
              responses:
                "204": {description: acknowledged}
      responses:
        "201": {description: created}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: {type: integer, format: int64}
        nickname: {type: string, nullable: true}
        parent: {$ref: "#/components/schemas/Pet"}
  parameters:
    PetId:
      name: petId
      in: path
      required: true
      schema: {type: integer}
  requestBodies:
    NewPet:
      required: true
      content:
        application/json:
          schema: {$ref: "#/components/schemas/Pet"}
  responses:
    Error:
      description: Unexpected error
  securitySchemes:
    bearer:
      type: http
      scheme: bearer
      bearerFormat: JWT
security:
  - bearer: []
"##;

#[test]
fn test_openapi_3_0_document() {
    let result = OpenApiReader::default().read_str(PETSTORE_3_0).unwrap();
    let diagnostic = &result.diagnostic;
    assert!(diagnostic.is_clean(), "{diagnostic:?}");
    assert_eq!(diagnostic.spec_version, Some(SpecVersion::V3_0));

    let document = &result.document;
    assert_eq!(document.servers[0].resolved_url(), "https://api.example.com/v1");
    assert_eq!(document.info.contact.as_ref().unwrap().name.as_deref(), Some("API Team"));

    let item = document.paths.items["/pets/{petId}"].as_item().unwrap();
    let shared = item.parameters[0].as_reference().unwrap();
    assert_eq!(shared.kind, ReferenceKind::Parameter);
    let parameter = item.parameters[0].resolve(document).unwrap();
    assert_eq!(parameter.location, Some(ParameterLocation::Path));

    let get = item.operation(OperationType::Get).unwrap();
    let tag = get.tags[0].resolve(document).unwrap();
    assert_eq!(tag.description.as_deref(), Some("Pet operations"));
    let ok = get.responses.get("200").unwrap().as_item().unwrap();
    let link = ok.links["owner"].as_item().unwrap();
    assert_eq!(
        link.parameters["ownerId"],
        LinkParameter::Expression(RuntimeExpression::new("$response.body#/ownerId"))
    );
    let error = get.responses.get("default").unwrap().resolve(document).unwrap();
    assert_eq!(error.description, "Unexpected error");

    let pets = document.paths.items["/pets"].as_item().unwrap();
    let post = pets.operation(OperationType::Post).unwrap();
    let body = post.request_body.as_ref().unwrap().resolve(document).unwrap();
    assert!(body.required);
    let callback = post.callbacks["onAdopted"].as_item().unwrap();
    let expression = RuntimeExpression::new("{$request.body#/callbackUrl}");
    assert!(callback.path_items[&expression].as_item().is_some());
}

#[test]
fn test_recursive_schema_is_not_expanded() {
    let result = OpenApiReader::default().read_str(PETSTORE_3_0).unwrap();
    let components = result.document.components.as_ref().unwrap();
    let pet = components.schemas["Pet"].as_item().unwrap();
    assert!(pet.properties["nickname"].as_item().unwrap().nullable);
    let parent = &pet.properties["parent"];
    assert!(parent.is_reference());
    let resolved = parent.resolve(&result.document).unwrap();
    assert_eq!(resolved.required, vec!["id"]);
}

#[test]
fn test_openapi_3_1_document() {
    let text = r##"
openapi: 3.1.0
jsonSchemaDialect: https://spec.openapis.org/oas/3.1/dialect/base
info:
  title: Events
  summary: Event feed
  version: "2"
  license: {name: Apache 2.0, identifier: Apache-2.0}
webhooks:
  newPet:
    $ref: "#/components/pathItems/PetEvent"
    description: Fired when a pet is added
components:
  pathItems:
    PetEvent:
      post:
        requestBody:
          content:
            application/json:
              schema: {$ref: "#/components/schemas/Pet"}
        responses:
          "200": {description: ok}
  schemas:
    Pet:
      type: [object, "null"]
      $defs:
        Age: {type: integer, exclusiveMinimum: 0}
      properties:
        age: {$ref: "#/$defs/Age"}
        name: {type: string, const: Rex}
"##;
    let result = OpenApiReader::default().read_str(text).unwrap();
    let diagnostic = &result.diagnostic;
    assert!(diagnostic.is_clean(), "{diagnostic:?}");

    let document = &result.document;
    assert_eq!(document.info.summary.as_deref(), Some("Event feed"));
    let hook = document.webhooks["newPet"].as_reference().unwrap();
    assert_eq!(hook.description.as_deref(), Some("Fired when a pet is added"));
    let item = document.webhooks["newPet"].resolve(document).unwrap();
    assert!(item.operation(OperationType::Post).is_some());

    let pet = document.components.as_ref().unwrap().schemas["Pet"]
        .as_item()
        .unwrap();
    assert!(pet.has_type("object") && pet.has_type("null"));
    let age = pet.defs["Age"].as_item().unwrap();
    assert_eq!(age.exclusive_minimum, Some(ExclusiveBound::Value(0.0)));
    let age_ref = pet.properties["age"].as_reference().unwrap();
    assert!(age_ref.raw_fragment);
    let name = pet.properties["name"].as_item().unwrap();
    assert_eq!(name.const_value, Some(serde_json::json!("Rex")));
}

#[test]
fn test_unknown_fields_are_reported_with_their_location() {
    let text = r##"
openapi: 3.0.0
info: {title: t, version: "1", colour: blue}
paths: {}
"##;
    let result = OpenApiReader::default().read_str(text).unwrap();
    let errors = &result.diagnostic.errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].pointer, "#/info");
    assert_eq!(errors[0].message, "colour is not a valid property at #/info");
}

#[test]
fn test_fragments_follow_the_requested_version() {
    let reader = OpenApiReader::new(ReaderSettings::default());
    let text = "type: integer\nexclusiveMinimum: true\nminimum: 0\n";
    let v3 = reader
        .read_fragment::<RefOr<Schema>>(text, SpecVersion::V3_0)
        .unwrap();
    let schema = v3.element.unwrap();
    assert_eq!(
        schema.as_item().unwrap().exclusive_minimum,
        Some(ExclusiveBound::Flag(true))
    );
}
