use alloy::sol;

sol! {
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq, Hash)]
    contract RolesAuthority {
        event OwnerUpdated(address indexed user, address indexed newOwner);
        event AuthorityUpdated(address indexed user, address indexed newAuthority);
        event UserRoleUpdated(address indexed user, uint8 indexed role, bool enabled);
        event PublicCapabilityUpdated(address indexed target, bytes4 indexed functionSig, bool enabled);
        event RoleCapabilityUpdated(uint8 indexed role, address indexed target, bytes4 indexed functionSig, bool enabled);

        function owner() external view returns (address);
        function setOwner(address newOwner) external;
        function authority() external view returns (address);
        function setAuthority(address newAuthority) external;

        function hasRole(address user, uint8 role) external view returns (bool);
        function doesRoleHaveCapability(uint8 role, address target, bytes4 functionSig) external view returns (bool);
        function canCall(address user, address target, bytes4 functionSig) external view returns (bool);
        function getUserRoles(address user) external view returns (bytes32);
        function getRolesWithCapability(address target, bytes4 functionSig) external view returns (bytes32);
        function isCapabilityPublic(address target, bytes4 functionSig) external view returns (bool);

        function setPublicCapability(address target, bytes4 functionSig, bool enabled) external;
        function setRoleCapability(uint8 role, address target, bytes4 functionSig, bool enabled) external;
        function setUserRole(address user, uint8 role, bool enabled) external;
    }
}
